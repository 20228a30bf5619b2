//! Content data structures and input validation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub detailed_description: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub live_url: String,
    pub image_url: String,
    pub featured: bool,
    pub category: ProjectCategory,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Mobile,
    Fullstack,
    Other,
}

impl ProjectCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Mobile => "mobile",
            ProjectCategory::Fullstack => "fullstack",
            ProjectCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "web" => Some(ProjectCategory::Web),
            "mobile" => Some(ProjectCategory::Mobile),
            "fullstack" => Some(ProjectCategory::Fullstack),
            "other" => Some(ProjectCategory::Other),
            _ => None,
        }
    }
}

impl Project {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Project title is required".to_string());
        }
        if self.title.chars().count() > 100 {
            return Err("Title cannot exceed 100 characters".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Project description is required".to_string());
        }
        if self.description.chars().count() > 500 {
            return Err("Description cannot exceed 500 characters".to_string());
        }
        if self.detailed_description.trim().is_empty() {
            return Err("Detailed description is required".to_string());
        }
        if self.detailed_description.chars().count() > 2000 {
            return Err("Detailed description cannot exceed 2000 characters".to_string());
        }
        if self.technologies.iter().all(|t| t.trim().is_empty()) {
            return Err("At least one technology is required".to_string());
        }
        if self.image_url.trim().is_empty() {
            return Err("Project image is required".to_string());
        }
        Ok(())
    }
}

/// Create payload. Fields default so missing keys surface through
/// [`Project::validate`] instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "ProjectInput::default_category")]
    pub category: ProjectCategory,
}

impl ProjectInput {
    fn default_category() -> ProjectCategory {
        ProjectCategory::Web
    }

    pub fn into_project(self) -> Project {
        let now = Utc::now().to_rfc3339();
        Project {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            description: self.description,
            detailed_description: self.detailed_description,
            technologies: self.technologies,
            github_url: self.github_url,
            live_url: self.live_url,
            image_url: self.image_url,
            featured: self.featured,
            category: self.category,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Partial update payload; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub detailed_description: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: Option<bool>,
    pub category: Option<ProjectCategory>,
}

impl ProjectUpdate {
    pub fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(detailed) = self.detailed_description {
            project.detailed_description = detailed;
        }
        if let Some(technologies) = self.technologies {
            project.technologies = technologies;
        }
        if let Some(github_url) = self.github_url {
            project.github_url = github_url;
        }
        if let Some(live_url) = self.live_url {
            project.live_url = live_url;
        }
        if let Some(image_url) = self.image_url {
            project.image_url = image_url;
        }
        if let Some(featured) = self.featured {
            project.featured = featured;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        project.updated_at = Utc::now().to_rfc3339();
    }
}

/// A skill entry shown on the public site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub category: SkillCategory,
    pub proficiency: u32,
    pub icon: String,
    #[serde(rename = "order")]
    pub sort_order: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Tool,
}

impl SkillCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::Devops => "devops",
            SkillCategory::Tool => "tool",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "frontend" => Some(SkillCategory::Frontend),
            "backend" => Some(SkillCategory::Backend),
            "database" => Some(SkillCategory::Database),
            "devops" => Some(SkillCategory::Devops),
            "tool" => Some(SkillCategory::Tool),
            _ => None,
        }
    }
}

impl Skill {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Skill name is required".to_string());
        }
        if !(1..=100).contains(&self.proficiency) {
            return Err("Proficiency must be between 1 and 100".to_string());
        }
        Ok(())
    }
}

/// Create payload for skills
#[derive(Debug, Deserialize)]
pub struct SkillInput {
    #[serde(default)]
    pub name: String,
    pub category: Option<SkillCategory>,
    pub proficiency: Option<u32>,
    pub icon: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i64>,
}

impl SkillInput {
    pub fn into_skill(self) -> Result<Skill, String> {
        let Some(category) = self.category else {
            return Err("Skill category is required".to_string());
        };

        let skill = Skill {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            category,
            proficiency: self.proficiency.unwrap_or(50),
            icon: self.icon.unwrap_or_else(|| "💻".to_string()),
            sort_order: self.sort_order.unwrap_or(0),
        };
        skill.validate()?;
        Ok(skill)
    }
}

/// Partial update payload for skills
#[derive(Debug, Default, Deserialize)]
pub struct SkillUpdate {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
    pub proficiency: Option<u32>,
    pub icon: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i64>,
}

impl SkillUpdate {
    pub fn apply(self, skill: &mut Skill) {
        if let Some(name) = self.name {
            skill.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            skill.category = category;
        }
        if let Some(proficiency) = self.proficiency {
            skill.proficiency = proficiency;
        }
        if let Some(icon) = self.icon {
            skill.icon = icon;
        }
        if let Some(sort_order) = self.sort_order {
            skill.sort_order = sort_order;
        }
    }
}
