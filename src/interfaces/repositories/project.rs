use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    entities::{
        pagination::PageWindow,
        project::{NewProject, Project, ProjectFilter, ProjectOrdering, ProjectRow},
    },
    errors::AppError,
    repositories::{
        sqlx_repo::SqlxProjectRepo,
        tag::{attach_tags, load_tags, TagLink},
    },
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// `window: None` returns every matching project.
    async fn list_projects(
        &self,
        filter: ProjectFilter,
        ordering: ProjectOrdering,
        window: Option<PageWindow>,
    ) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self, filter: ProjectFilter) -> Result<u64, AppError>;
    async fn create_project(&self, project: &NewProject) -> Result<Project, AppError>;
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: ProjectFilter) {
    if filter.featured_only {
        builder.push(" WHERE featured = TRUE");
    }
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(
        &self,
        filter: ProjectFilter,
        ordering: ProjectOrdering,
        window: Option<PageWindow>,
    ) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects");
        push_filter(&mut builder, filter);

        match ordering {
            ProjectOrdering::FeaturedFirst => {
                builder.push(" ORDER BY featured DESC, display_order ASC, id ASC");
            }
            ProjectOrdering::ManualRank => {
                builder.push(" ORDER BY display_order ASC, id ASC");
            }
        }

        if let Some(window) = window {
            builder.push(" LIMIT ").push_bind(window.limit);
            builder.push(" OFFSET ").push_bind(window.offset);
        }

        let rows: Vec<ProjectRow> = builder
            .build_query_as::<ProjectRow>()
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut tags = load_tags(&self.pool, TagLink::Project, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_tags = tags.remove(&row.id).unwrap_or_default();
                Project::from_row(row, row_tags)
            })
            .collect())
    }

    async fn count_projects(&self, filter: ProjectFilter) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM projects");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: ProjectRow = sqlx::query_as(
            r#"
            INSERT INTO projects (
                title, subtitle, description, image_url, thumbnail_url, images,
                github_url, live_url, featured, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.subtitle)
        .bind(&project.description)
        .bind(&project.image_url)
        .bind(&project.thumbnail_url)
        .bind(&project.images)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(project.featured)
        .bind(project.order)
        .fetch_one(&mut *tx)
        .await?;

        let tags = attach_tags(&mut tx, TagLink::Project, row.id, &project.tags).await?;
        tx.commit().await?;

        Ok(Project::from_row(row, tags))
    }
}
