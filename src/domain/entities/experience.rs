use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::entities::{
    tag::{NewTag, Tag},
    validation::{new_validation_error, validate_title},
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExperienceRow {
    pub id: i32,
    pub title: String,
    pub role: String,
    pub company: String,
    pub location: String,
    pub content: String,
    pub highlights: Option<Vec<String>>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i32,
    pub title: String,
    pub role: String,
    pub company: String,
    pub location: String,
    pub content: String,
    pub highlights: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Experience {
    /// Single normalization point for stored experiences.
    pub fn from_row(row: ExperienceRow, tags: Vec<Tag>) -> Self {
        Experience {
            id: row.id,
            title: row.title,
            role: row.role,
            company: row.company,
            location: row.location,
            content: row.content,
            highlights: row.highlights.unwrap_or_default(),
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_range"))]
pub struct NewExperience {
    #[validate(length(min = 1, max = 120), custom(function = "validate_title"))]
    pub title: String,

    #[validate(length(min = 1, max = 120))]
    pub role: String,

    #[validate(length(min = 1, max = 120))]
    pub company: String,

    #[validate(length(max = 120))]
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub highlights: Vec<String>,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_hidden: bool,

    #[validate(nested)]
    #[serde(default)]
    pub tags: Vec<NewTag>,
}

fn validate_date_range(experience: &NewExperience) -> Result<(), ValidationError> {
    match experience.end_date {
        Some(end) if end < experience.start_date => Err(new_validation_error(
            "date_range",
            "endDate must not be earlier than startDate",
        )),
        _ => Ok(()),
    }
}
