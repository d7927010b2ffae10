use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::{
        experience::{Experience, ExperienceRow, NewExperience},
        pagination::PageWindow,
    },
    errors::AppError,
    repositories::{
        sqlx_repo::SqlxExperienceRepo,
        tag::{attach_tags, load_tags, TagLink},
    },
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Reads never return hidden experiences.
    async fn list_experiences(&self, window: PageWindow) -> Result<Vec<Experience>, AppError>;
    async fn count_experiences(&self) -> Result<u64, AppError>;
    async fn get_experience_by_id(&self, id: i32) -> Result<Option<Experience>, AppError>;
    async fn create_experience(&self, experience: &NewExperience) -> Result<Experience, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }

    async fn with_tags(&self, rows: Vec<ExperienceRow>) -> Result<Vec<Experience>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut tags = load_tags(&self.pool, TagLink::Experience, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_tags = tags.remove(&row.id).unwrap_or_default();
                Experience::from_row(row, row_tags)
            })
            .collect())
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn list_experiences(&self, window: PageWindow) -> Result<Vec<Experience>, AppError> {
        let rows: Vec<ExperienceRow> = sqlx::query_as(
            r#"
            SELECT * FROM experiences
            WHERE is_hidden = FALSE
            ORDER BY start_date DESC, id ASC
            LIMIT $1 OFFSET $2
            "#
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        self.with_tags(rows).await
    }

    async fn count_experiences(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM experiences WHERE is_hidden = FALSE"
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }

    async fn get_experience_by_id(&self, id: i32) -> Result<Option<Experience>, AppError> {
        let row: Option<ExperienceRow> = sqlx::query_as(
            "SELECT * FROM experiences WHERE id = $1 AND is_hidden = FALSE"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create_experience(&self, experience: &NewExperience) -> Result<Experience, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: ExperienceRow = sqlx::query_as(
            r#"
            INSERT INTO experiences (
                title, role, company, location, content, highlights, start_date, end_date, is_hidden
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#
        )
        .bind(&experience.title)
        .bind(&experience.role)
        .bind(&experience.company)
        .bind(&experience.location)
        .bind(&experience.content)
        .bind(&experience.highlights)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_hidden)
        .fetch_one(&mut *tx)
        .await?;

        let tags = attach_tags(&mut tx, TagLink::Experience, row.id, &experience.tags).await?;
        tx.commit().await?;

        Ok(Experience::from_row(row, tags))
    }
}
