use async_trait::async_trait;

use crate::{errors::AppError, repositories::sqlx_repo::SqlxMaintenanceRepo};

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    /// Removes experiences, projects, blogs and tags. Contacts are kept.
    async fn clear_content(&self) -> Result<(), AppError>;
}

impl SqlxMaintenanceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxMaintenanceRepo { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for SqlxMaintenanceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn clear_content(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            TRUNCATE TABLE experience_tags, project_tags, blog_tags,
                experiences, projects, blogs, tags
            RESTART IDENTITY CASCADE
            "#
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
