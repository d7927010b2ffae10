use async_trait::async_trait;

use crate::{
    entities::contact::{Contact, NewContact},
    errors::AppError,
    repositories::sqlx_repo::SqlxContactRepo,
};

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, AppError>;
}

impl SqlxContactRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxContactRepo { pool }
    }
}

#[async_trait]
impl ContactRepository for SqlxContactRepo {
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, AppError> {
        let created = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (needs, name, email, project_type, budget, additional)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, needs, name, email, project_type, budget, additional, created_at
            "#
        )
        .bind(&contact.needs)
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.project_type)
        .bind(&contact.budget)
        .bind(&contact.additional)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
