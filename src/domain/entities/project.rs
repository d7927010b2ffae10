use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{
    tag::{NewTag, Tag},
    validation::{validate_asset_url, validate_asset_urls, validate_title, validate_url},
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub images: Vec<String>,
    pub github_url: Option<String>,
    pub live_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Project {
    /// Single normalization point for stored projects.
    pub fn from_row(row: ProjectRow, tags: Vec<Tag>) -> Self {
        Project {
            id: row.id,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            image_url: row.image_url,
            thumbnail_url: non_blank(row.thumbnail_url),
            images: row.images.unwrap_or_default(),
            github_url: non_blank(row.github_url),
            live_url: non_blank(row.live_url),
            featured: row.featured,
            order: row.order,
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectFilter {
    pub featured_only: bool,
}

/// Canonical orderings. The JSON API lists featured projects first; the
/// projects page follows the manual rank only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectOrdering {
    #[default]
    FeaturedFirst,
    ManualRank,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(length(min = 1, max = 120), custom(function = "validate_title"))]
    pub title: String,

    #[validate(length(max = 200))]
    #[serde(default)]
    pub subtitle: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_asset_url"))]
    pub image_url: String,

    #[validate(custom(function = "validate_asset_url"))]
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[validate(custom(function = "validate_asset_urls"))]
    #[serde(default)]
    pub images: Vec<String>,

    #[validate(custom(function = "validate_url"))]
    #[serde(default)]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    #[serde(default)]
    pub live_url: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub order: i32,

    #[validate(nested)]
    #[serde(default)]
    pub tags: Vec<NewTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optional_fields_normalize() {
        let row = ProjectRow {
            id: 7,
            title: "Sites".into(),
            subtitle: "Static site generator".into(),
            description: "...".into(),
            image_url: "/images/projects/sites.png".into(),
            thumbnail_url: Some("".into()),
            images: None,
            github_url: None,
            live_url: Some("https://example.com".into()),
            featured: true,
            order: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let project = Project::from_row(row, vec![]);
        assert!(project.images.is_empty());
        assert_eq!(project.thumbnail_url, None);

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["images"], serde_json::json!([]));
        assert_eq!(json["thumbnailUrl"], serde_json::Value::Null);
        assert_eq!(json["order"], 2);
    }

    #[test]
    fn external_links_must_be_http() {
        let project = NewProject {
            title: "Sites".into(),
            subtitle: String::new(),
            description: String::new(),
            image_url: "/images/projects/sites.png".into(),
            thumbnail_url: None,
            images: vec!["/images/a.png".into()],
            github_url: Some("javascript:alert(1)".into()),
            live_url: None,
            featured: false,
            order: 0,
            tags: vec![],
        };
        assert!(project.validate().is_err());
    }
}
