//! Content storage backed by SQLite.

use crate::content::models::{Project, ProjectCategory, Skill, SkillCategory};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row, ToSql};
use uuid::Uuid;

const PROJECT_COLUMNS: &str = "id, title, description, detailed_description, technologies, \
     github_url, live_url, image_url, featured, category, created_at, updated_at";

const SKILL_COLUMNS: &str = "id, name, category, proficiency, icon, sort_order";

/// Store for projects and skills. Same connection-per-operation shape as
/// the credential store; both share one database file.
pub struct ContentStore {
    db_path: String,
}

impl ContentStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                detailed_description TEXT NOT NULL,
                technologies TEXT NOT NULL,
                github_url TEXT NOT NULL DEFAULT '',
                live_url TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL,
                featured INTEGER NOT NULL DEFAULT 0,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT UNIQUE NOT NULL,
                category TEXT NOT NULL,
                proficiency INTEGER NOT NULL,
                icon TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        Ok(())
    }

    // ===== Projects =====

    /// List projects, newest first, with optional filters.
    pub fn list_projects(
        &self,
        featured: Option<bool>,
        category: Option<ProjectCategory>,
    ) -> Result<Vec<Project>> {
        let conn = Connection::open(&self.db_path)?;
        let base = format!("SELECT {} FROM projects", PROJECT_COLUMNS);
        let order = " ORDER BY created_at DESC";

        match (featured, category) {
            (Some(f), Some(c)) => Self::query_projects(
                &conn,
                &format!("{base} WHERE featured = ?1 AND category = ?2{order}"),
                &[&f, &c.as_str()],
            ),
            (Some(f), None) => Self::query_projects(
                &conn,
                &format!("{base} WHERE featured = ?1{order}"),
                &[&f],
            ),
            (None, Some(c)) => Self::query_projects(
                &conn,
                &format!("{base} WHERE category = ?1{order}"),
                &[&c.as_str()],
            ),
            (None, None) => Self::query_projects(&conn, &format!("{base}{order}"), &[]),
        }
    }

    fn query_projects(
        conn: &Connection,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<Project>> {
        let mut stmt = conn.prepare(sql)?;
        let projects = stmt
            .query_map(params, Self::row_to_project)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    pub fn get_project(&self, id: &Uuid) -> Result<Option<Project>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM projects WHERE id = ?1",
            PROJECT_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_project) {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn insert_project(&self, project: &Project) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO projects (id, title, description, detailed_description, technologies,
                 github_url, live_url, image_url, featured, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                project.id.to_string(),
                project.title,
                project.description,
                project.detailed_description,
                serde_json::to_string(&project.technologies)?,
                project.github_url,
                project.live_url,
                project.image_url,
                project.featured,
                project.category.as_str(),
                project.created_at,
                project.updated_at,
            ],
        )
        .context("Failed to insert project")?;
        Ok(())
    }

    pub fn update_project(&self, project: &Project) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn
            .execute(
                "UPDATE projects SET title = ?2, description = ?3, detailed_description = ?4,
                     technologies = ?5, github_url = ?6, live_url = ?7, image_url = ?8,
                     featured = ?9, category = ?10, updated_at = ?11
                 WHERE id = ?1",
                params![
                    project.id.to_string(),
                    project.title,
                    project.description,
                    project.detailed_description,
                    serde_json::to_string(&project.technologies)?,
                    project.github_url,
                    project.live_url,
                    project.image_url,
                    project.featured,
                    project.category.as_str(),
                    project.updated_at,
                ],
            )
            .context("Failed to update project")?;

        if rows == 0 {
            anyhow::bail!("Project not found");
        }
        Ok(())
    }

    pub fn delete_project(&self, id: &Uuid) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "DELETE FROM projects WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows == 0 {
            anyhow::bail!("Project not found");
        }
        Ok(())
    }

    fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
        let technologies_json: String = row.get(4)?;
        let category_str: String = row.get(9)?;
        Ok(Project {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            title: row.get(1)?,
            description: row.get(2)?,
            detailed_description: row.get(3)?,
            technologies: serde_json::from_str(&technologies_json).unwrap_or_default(),
            github_url: row.get(5)?,
            live_url: row.get(6)?,
            image_url: row.get(7)?,
            featured: row.get(8)?,
            category: ProjectCategory::from_str(&category_str)
                .unwrap_or(ProjectCategory::Other),
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }

    // ===== Skills =====

    /// List skills in display order, optionally filtered by category.
    pub fn list_skills(&self, category: Option<SkillCategory>) -> Result<Vec<Skill>> {
        let conn = Connection::open(&self.db_path)?;

        let skills = match category {
            Some(c) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skills WHERE category = ?1 ORDER BY sort_order",
                    SKILL_COLUMNS
                ))?;
                let rows = stmt.query_map(params![c.as_str()], Self::row_to_skill)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM skills ORDER BY sort_order",
                    SKILL_COLUMNS
                ))?;
                let rows = stmt.query_map([], Self::row_to_skill)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(skills)
    }

    pub fn get_skill(&self, id: &Uuid) -> Result<Option<Skill>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM skills WHERE id = ?1",
            SKILL_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_skill) {
            Ok(skill) => Ok(Some(skill)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Case-sensitive name lookup, used to reject duplicate skill names
    /// before hitting the UNIQUE constraint.
    pub fn get_skill_by_name(&self, name: &str) -> Result<Option<Skill>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM skills WHERE name = ?1",
            SKILL_COLUMNS
        ))?;

        match stmt.query_row(params![name], Self::row_to_skill) {
            Ok(skill) => Ok(Some(skill)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn insert_skill(&self, skill: &Skill) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO skills (id, name, category, proficiency, icon, sort_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                skill.id.to_string(),
                skill.name,
                skill.category.as_str(),
                skill.proficiency,
                skill.icon,
                skill.sort_order,
            ],
        )
        .context("Failed to insert skill")?;
        Ok(())
    }

    pub fn update_skill(&self, skill: &Skill) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn
            .execute(
                "UPDATE skills SET name = ?2, category = ?3, proficiency = ?4, icon = ?5,
                     sort_order = ?6
                 WHERE id = ?1",
                params![
                    skill.id.to_string(),
                    skill.name,
                    skill.category.as_str(),
                    skill.proficiency,
                    skill.icon,
                    skill.sort_order,
                ],
            )
            .context("Failed to update skill")?;

        if rows == 0 {
            anyhow::bail!("Skill not found");
        }
        Ok(())
    }

    pub fn delete_skill(&self, id: &Uuid) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute("DELETE FROM skills WHERE id = ?1", params![id.to_string()])?;

        if rows == 0 {
            anyhow::bail!("Skill not found");
        }
        Ok(())
    }

    fn row_to_skill(row: &Row) -> rusqlite::Result<Skill> {
        let category_str: String = row.get(2)?;
        Ok(Skill {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            name: row.get(1)?,
            category: SkillCategory::from_str(&category_str).unwrap_or(SkillCategory::Tool),
            proficiency: row.get(3)?,
            icon: row.get(4)?,
            sort_order: row.get(5)?,
        })
    }
}
