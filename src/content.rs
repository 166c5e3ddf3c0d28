//! Portfolio catalogue
//!
//! Projects, awards and the tech stack, stored as JSON and embedded at
//! compile time. The engine iterates and renders these; the only rule it
//! enforces is that a gallery needs at least one media item.

use serde::{Deserialize, Serialize};

use crate::engine::MediaItem;
use crate::error::Result;

const EMBEDDED: &str = include_str!("../assets/portfolio.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
        }
    }

    /// CSS modifier class (`"in-progress"`)
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }
}

/// Source repository link on a project card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub github: Vec<RepoLink>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl Project {
    /// Only projects with media get a gallery button
    pub fn has_gallery(&self) -> bool {
        !self.media.is_empty()
    }

    pub fn gallery_label(&self) -> Option<String> {
        self.has_gallery()
            .then(|| format!("View Demo ({})", self.media.len()))
    }

    /// `"1 member"` / `"3 members"`
    pub fn team_label(&self) -> Option<String> {
        self.team_size.map(|n| match n {
            1 => "1 member".to_string(),
            n => format!("{n} members"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub achievement: String,
    pub recognition: String,
    pub year: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub link_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Achievement {
    pub fn link_label(&self) -> &str {
        self.link_text.as_deref().unwrap_or("View Details")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechSkill {
    pub name: String,
    /// Self-assessed proficiency, 0-100
    pub level: u8,
    /// Icon URL
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogue {
    #[serde(default)]
    pub tech_stack: Vec<TechSkill>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Catalogue {
    /// The catalogue compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let catalogue: Catalogue = serde_json::from_str(json)?;
        log::debug!(
            "Catalogue: {} projects, {} achievements, {} skills",
            catalogue.projects.len(),
            catalogue.achievements.len(),
            catalogue.tech_stack.len()
        );
        Ok(catalogue)
    }

    pub fn project(&self, title: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MediaKind;
    use crate::error::EngineError;

    #[test]
    fn test_embedded_catalogue_parses() {
        let c = Catalogue::embedded().unwrap();
        assert_eq!(c.tech_stack.len(), 10);
        assert_eq!(c.achievements.len(), 6);
        assert_eq!(c.projects.len(), 3);
        assert!(c.tech_stack.iter().all(|t| t.level <= 100));
    }

    #[test]
    fn test_only_media_projects_offer_gallery() {
        let c = Catalogue::embedded().unwrap();
        let galleries: Vec<_> = c.projects.iter().filter(|p| p.has_gallery()).collect();
        assert_eq!(galleries.len(), 1);
        assert_eq!(galleries[0].gallery_label().as_deref(), Some("View Demo (2)"));
        assert!(galleries[0].media.iter().all(|m| m.kind == MediaKind::Video));
    }

    #[test]
    fn test_status_slug() {
        assert_eq!(ProjectStatus::InProgress.slug(), "in-progress");
        assert_eq!(ProjectStatus::Completed.slug(), "completed");
    }

    #[test]
    fn test_minimal_project_defaults() {
        let json = r#"{"projects":[{
            "title": "CLI",
            "description": "d",
            "tech": [],
            "status": "In Progress",
            "teamSize": 1
        }]}"#;
        let c = Catalogue::from_json(json).unwrap();
        let p = &c.projects[0];
        assert!(!p.has_gallery());
        assert_eq!(p.gallery_label(), None);
        assert_eq!(p.team_label().as_deref(), Some("1 member"));
        assert!(p.github.is_empty());
        assert!(c.project("CLI").is_some());
    }

    #[test]
    fn test_achievement_link_label_default() {
        let c = Catalogue::embedded().unwrap();
        assert_eq!(c.achievements[0].link_label(), "View Details");
    }

    #[test]
    fn test_bad_json_is_content_error() {
        let err = Catalogue::from_json("{\"projects\": 3}").unwrap_err();
        assert!(matches!(err, EngineError::Content(_)));
    }
}
