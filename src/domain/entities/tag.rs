use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::validation::validate_asset_url;

const MAX_TAG_NAME_LENGTH: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub icon_url: Option<String>,
    pub is_tech: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tag joined to the entity that references it, used to attach tags to a
/// whole page of records with a single query.
#[derive(Debug, sqlx::FromRow)]
pub struct TagLinkRow {
    pub owner_id: i32,
    #[sqlx(flatten)]
    pub tag: Tag,
}

/// Tag definition used for connect-or-create. An existing tag with the same
/// name wins; the icon and `is_tech` of a later definition are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTag {
    #[validate(length(min = 1, max = MAX_TAG_NAME_LENGTH, message = "Tag name must be 1-50 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_asset_url"))]
    pub icon_url: Option<String>,

    #[serde(default)]
    pub is_tech: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TechTag {
    pub name: String,
    pub icon_url: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>, icon_url: Option<&str>, is_tech: bool) -> Self {
        NewTag {
            name: name.into(),
            icon_url: icon_url.map(str::to_string),
            is_tech,
        }
    }
}
