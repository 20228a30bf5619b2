//! Content endpoints: project and skill CRUD.
//!
//! Reads are public; mutations sit behind the auth guard and role gate.

use crate::content::{
    models::{
        Project, ProjectCategory, ProjectInput, ProjectUpdate, Skill, SkillCategory, SkillInput,
        SkillUpdate,
    },
    store::ContentStore,
};
use crate::models::MessageResponse;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Shared content state
#[derive(Clone)]
pub struct ContentState {
    pub store: Arc<ContentStore>,
}

impl ContentState {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Serialize)]
struct ListResponse<T> {
    success: bool,
    count: usize,
    data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    success: bool,
    data: T,
}

// ===== Projects =====

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    featured: Option<bool>,
    category: Option<String>,
}

/// List projects - GET /api/projects
pub async fn list_projects(
    State(state): State<ContentState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Response, ContentApiError> {
    // Unknown category values are ignored rather than rejected.
    let category = query
        .category
        .as_deref()
        .and_then(ProjectCategory::from_str);

    let projects = state
        .store
        .list_projects(query.featured, category)
        .map_err(ContentApiError::Internal)?;

    Ok(Json(ListResponse {
        success: true,
        count: projects.len(),
        data: projects,
    })
    .into_response())
}

/// Get one project - GET /api/projects/:id
pub async fn get_project(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Project>>, ContentApiError> {
    let id = parse_id(&id)?;
    let project = state
        .store
        .get_project(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Project not found"))?;

    Ok(Json(DataResponse {
        success: true,
        data: project,
    }))
}

/// Create project - POST /api/projects (admin)
pub async fn create_project(
    State(state): State<ContentState>,
    Json(payload): Json<ProjectInput>,
) -> Result<Response, ContentApiError> {
    let project = payload.into_project();
    project.validate().map_err(ContentApiError::Validation)?;

    state
        .store
        .insert_project(&project)
        .map_err(ContentApiError::Internal)?;

    info!("✅ Project created: {}", project.title);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            success: true,
            data: project,
        }),
    )
        .into_response())
}

/// Update project - PUT /api/projects/:id (admin)
pub async fn update_project(
    State(state): State<ContentState>,
    Path(id): Path<String>,
    Json(payload): Json<ProjectUpdate>,
) -> Result<Json<DataResponse<Project>>, ContentApiError> {
    let id = parse_id(&id)?;
    let mut project = state
        .store
        .get_project(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Project not found"))?;

    payload.apply(&mut project);
    project.validate().map_err(ContentApiError::Validation)?;

    state
        .store
        .update_project(&project)
        .map_err(ContentApiError::Internal)?;

    Ok(Json(DataResponse {
        success: true,
        data: project,
    }))
}

/// Delete project - DELETE /api/projects/:id (admin)
pub async fn delete_project(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ContentApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get_project(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Project not found"))?;

    state
        .store
        .delete_project(&id)
        .map_err(ContentApiError::Internal)?;

    info!("🗑️  Project deleted: {}", id);

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}

// ===== Skills =====

#[derive(Debug, Deserialize)]
pub struct SkillListQuery {
    category: Option<String>,
}

/// List skills - GET /api/skills
pub async fn list_skills(
    State(state): State<ContentState>,
    Query(query): Query<SkillListQuery>,
) -> Result<Response, ContentApiError> {
    let category = query.category.as_deref().and_then(SkillCategory::from_str);

    let skills = state
        .store
        .list_skills(category)
        .map_err(ContentApiError::Internal)?;

    Ok(Json(ListResponse {
        success: true,
        count: skills.len(),
        data: skills,
    })
    .into_response())
}

/// Get one skill - GET /api/skills/:id
pub async fn get_skill(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Skill>>, ContentApiError> {
    let id = parse_id(&id)?;
    let skill = state
        .store
        .get_skill(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Skill not found"))?;

    Ok(Json(DataResponse {
        success: true,
        data: skill,
    }))
}

/// Create skill - POST /api/skills (admin)
pub async fn create_skill(
    State(state): State<ContentState>,
    Json(payload): Json<SkillInput>,
) -> Result<Response, ContentApiError> {
    let skill = payload.into_skill().map_err(ContentApiError::Validation)?;

    if state
        .store
        .get_skill_by_name(&skill.name)
        .map_err(ContentApiError::Internal)?
        .is_some()
    {
        return Err(ContentApiError::Duplicate);
    }

    state
        .store
        .insert_skill(&skill)
        .map_err(ContentApiError::Internal)?;

    info!("✅ Skill created: {}", skill.name);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            success: true,
            data: skill,
        }),
    )
        .into_response())
}

/// Update skill - PUT /api/skills/:id (admin)
pub async fn update_skill(
    State(state): State<ContentState>,
    Path(id): Path<String>,
    Json(payload): Json<SkillUpdate>,
) -> Result<Json<DataResponse<Skill>>, ContentApiError> {
    let id = parse_id(&id)?;
    let mut skill = state
        .store
        .get_skill(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Skill not found"))?;

    payload.apply(&mut skill);
    skill.validate().map_err(ContentApiError::Validation)?;

    // Renaming onto an existing skill would trip the UNIQUE constraint.
    if let Some(existing) = state
        .store
        .get_skill_by_name(&skill.name)
        .map_err(ContentApiError::Internal)?
    {
        if existing.id != skill.id {
            return Err(ContentApiError::Duplicate);
        }
    }

    state
        .store
        .update_skill(&skill)
        .map_err(ContentApiError::Internal)?;

    Ok(Json(DataResponse {
        success: true,
        data: skill,
    }))
}

/// Delete skill - DELETE /api/skills/:id (admin)
pub async fn delete_skill(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ContentApiError> {
    let id = parse_id(&id)?;
    state
        .store
        .get_skill(&id)
        .map_err(ContentApiError::Internal)?
        .ok_or(ContentApiError::NotFound("Skill not found"))?;

    state
        .store
        .delete_skill(&id)
        .map_err(ContentApiError::Internal)?;

    info!("🗑️  Skill deleted: {}", id);

    Ok(Json(MessageResponse::new("Skill deleted successfully")))
}

/// Malformed ids behave like missing resources, not client syntax errors.
fn parse_id(raw: &str) -> Result<Uuid, ContentApiError> {
    Uuid::parse_str(raw).map_err(|_| ContentApiError::NotFound("Resource not found"))
}

/// Content API errors
#[derive(Debug)]
pub enum ContentApiError {
    Validation(String),
    NotFound(&'static str),
    Duplicate,
    Internal(anyhow::Error),
}

impl IntoResponse for ContentApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ContentApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ContentApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            ContentApiError::Duplicate => (
                StatusCode::BAD_REQUEST,
                "Duplicate field value entered".to_string(),
            ),
            ContentApiError::Internal(err) => {
                error!("Content API internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn test_state() -> (ContentState, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = Arc::new(ContentStore::new(temp_file.path().to_str().unwrap()).unwrap());
        (ContentState::new(store), temp_file)
    }

    fn project_input(title: &str) -> ProjectInput {
        ProjectInput {
            title: title.to_string(),
            description: "desc".to_string(),
            detailed_description: "detailed".to_string(),
            technologies: vec!["rust".to_string()],
            github_url: String::new(),
            live_url: String::new(),
            image_url: "/img.png".to_string(),
            featured: false,
            category: ProjectCategory::Web,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_project() {
        let (state, _temp) = test_state();

        let response = create_project(State(state.clone()), Json(project_input("One")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let listed = state.store.list_projects(None, None).unwrap();
        assert_eq!(listed.len(), 1);

        let fetched = get_project(
            State(state),
            Path(listed[0].id.to_string()),
        )
        .await
        .unwrap();
        assert_eq!(fetched.0.data.title, "One");
    }

    #[tokio::test]
    async fn test_create_project_rejects_invalid_input() {
        let (state, _temp) = test_state();

        let err = create_project(State(state.clone()), Json(project_input("")))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentApiError::Validation(_)));
        assert!(state.store.list_projects(None, None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_project_missing_and_malformed_ids() {
        let (state, _temp) = test_state();

        let err = get_project(State(state.clone()), Path(Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentApiError::NotFound("Project not found")));

        let err = get_project(State(state), Path("not-a-uuid".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentApiError::NotFound("Resource not found")));
    }

    #[tokio::test]
    async fn test_update_project_partial() {
        let (state, _temp) = test_state();
        create_project(State(state.clone()), Json(project_input("One")))
            .await
            .unwrap();
        let id = state.store.list_projects(None, None).unwrap()[0].id;

        let update = ProjectUpdate {
            featured: Some(true),
            ..Default::default()
        };
        let updated = update_project(State(state), Path(id.to_string()), Json(update))
            .await
            .unwrap();
        assert!(updated.0.data.featured);
        assert_eq!(updated.0.data.title, "One");
    }

    #[tokio::test]
    async fn test_delete_project() {
        let (state, _temp) = test_state();
        create_project(State(state.clone()), Json(project_input("One")))
            .await
            .unwrap();
        let id = state.store.list_projects(None, None).unwrap()[0].id;

        let response = delete_project(State(state.clone()), Path(id.to_string()))
            .await
            .unwrap();
        assert_eq!(response.0.message, "Project deleted successfully");
        assert!(state.store.list_projects(None, None).unwrap().is_empty());
    }

    fn skill_input(name: &str) -> SkillInput {
        SkillInput {
            name: name.to_string(),
            category: Some(SkillCategory::Backend),
            proficiency: Some(80),
            icon: None,
            sort_order: Some(0),
        }
    }

    #[tokio::test]
    async fn test_create_skill_rejects_duplicate_name() {
        let (state, _temp) = test_state();

        create_skill(State(state.clone()), Json(skill_input("Rust")))
            .await
            .unwrap();
        let err = create_skill(State(state), Json(skill_input("Rust")))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentApiError::Duplicate));
    }

    #[tokio::test]
    async fn test_update_skill_rejects_rename_onto_existing() {
        let (state, _temp) = test_state();
        create_skill(State(state.clone()), Json(skill_input("Rust")))
            .await
            .unwrap();
        create_skill(State(state.clone()), Json(skill_input("Go")))
            .await
            .unwrap();

        let go = state.store.get_skill_by_name("Go").unwrap().unwrap();
        let update = SkillUpdate {
            name: Some("Rust".to_string()),
            ..Default::default()
        };
        let err = update_skill(State(state), Path(go.id.to_string()), Json(update))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentApiError::Duplicate));
    }

    #[tokio::test]
    async fn test_skill_update_keeps_unchanged_fields() {
        let (state, _temp) = test_state();
        create_skill(State(state.clone()), Json(skill_input("Rust")))
            .await
            .unwrap();
        let skill = state.store.get_skill_by_name("Rust").unwrap().unwrap();

        let update = SkillUpdate {
            proficiency: Some(95),
            ..Default::default()
        };
        let updated = update_skill(State(state), Path(skill.id.to_string()), Json(update))
            .await
            .unwrap();
        assert_eq!(updated.0.data.proficiency, 95);
        assert_eq!(updated.0.data.name, "Rust");
    }
}
