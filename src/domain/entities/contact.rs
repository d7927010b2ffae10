use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{entities::validation::validate_contact_email, errors::AppError};

/// Raw contact form body. Every field is optional at the wire level so a
/// missing field produces a field-specific 400 instead of a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub needs: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub additional: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, max = 200, message = "needs must be at most 200 characters"))]
    pub needs: String,

    #[validate(length(min = 1, max = 100, message = "name must be at most 100 characters"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        custom(function = "validate_contact_email"),
        length(max = 254, message = "Invalid email format")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "projectType must be at most 100 characters"))]
    pub project_type: String,

    #[validate(length(min = 1, max = 100, message = "budget must be at most 100 characters"))]
    pub budget: String,

    #[validate(length(max = 5000, message = "additional must be at most 5000 characters"))]
    pub additional: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i32,
    pub needs: String,
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub budget: String,
    pub additional: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
    pub contact_id: i32,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation(field, format!("{} is required", field))),
    }
}

impl TryFrom<ContactForm> for NewContact {
    type Error = AppError;

    /// Required fields are checked in form order so the first missing one is
    /// reported, then formats and lengths.
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let contact = NewContact {
            needs: required("needs", form.needs)?,
            name: required("name", form.name)?,
            email: required("email", form.email)?,
            project_type: required("projectType", form.project_type)?,
            budget: required("budget", form.budget)?,
            additional: form.additional.map(|a| a.trim().to_string()).unwrap_or_default(),
        };

        contact.validate()?;
        Ok(contact)
    }
}
