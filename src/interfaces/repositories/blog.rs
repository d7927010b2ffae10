use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    entities::{
        blog::{Blog, BlogRow, BlogSitemapEntry, NewBlog},
        pagination::PageWindow,
    },
    errors::AppError,
    repositories::{
        sqlx_repo::SqlxBlogRepo,
        tag::{attach_tags, load_tags, TagLink},
    },
};

/// Read access is limited to published posts; drafts never leave the store.
#[async_trait]
pub trait BlogRepository: Sync + Send {
    async fn list_published_blogs(&self, window: PageWindow) -> Result<Vec<Blog>, AppError>;
    async fn count_published_blogs(&self) -> Result<u64, AppError>;
    async fn get_published_blog_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError>;
    async fn list_sitemap_entries(&self) -> Result<Vec<BlogSitemapEntry>, AppError>;
    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError>;
}

impl SqlxBlogRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxBlogRepo { pool }
    }

    async fn with_tags(&self, rows: Vec<BlogRow>) -> Result<Vec<Blog>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut tags = load_tags(&self.pool, TagLink::Blog, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_tags = tags.remove(&row.id).unwrap_or_default();
                Blog::from_row(row, row_tags)
            })
            .collect())
    }
}

#[async_trait]
impl BlogRepository for SqlxBlogRepo {
    async fn list_published_blogs(&self, window: PageWindow) -> Result<Vec<Blog>, AppError> {
        let rows: Vec<BlogRow> = sqlx::query_as(
            r#"
            SELECT * FROM blogs
            WHERE published = TRUE
            ORDER BY published_at DESC NULLS LAST, id DESC
            LIMIT $1 OFFSET $2
            "#
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        self.with_tags(rows).await
    }

    async fn count_published_blogs(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs WHERE published = TRUE")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn get_published_blog_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError> {
        let row: Option<BlogRow> = sqlx::query_as(
            "SELECT * FROM blogs WHERE slug = $1 AND published = TRUE"
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_sitemap_entries(&self) -> Result<Vec<BlogSitemapEntry>, AppError> {
        let entries = sqlx::query_as::<_, BlogSitemapEntry>(
            r#"
            SELECT slug, published_at, updated_at
            FROM blogs
            WHERE published = TRUE
            ORDER BY published_at DESC NULLS LAST, id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: BlogRow = sqlx::query_as(
            r#"
            INSERT INTO blogs (
                title, slug, description, excerpt, content, image_url, images,
                published, published_at, featured, reading_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#
        )
        .bind(&blog.title)
        .bind(blog.slug_or_default())
        .bind(&blog.description)
        .bind(&blog.excerpt)
        .bind(&blog.content)
        .bind(&blog.image_url)
        .bind(&blog.images)
        .bind(blog.published)
        .bind(blog.published_at)
        .bind(blog.featured)
        .bind(blog.reading_time)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("blogs_slug_key") {
                    return AppError::Conflict("Slug already exists".into());
                }
            }
            AppError::from(e)
        })?;

        let tags = attach_tags(&mut tx, TagLink::Blog, row.id, &blog.tags).await?;
        tx.commit().await?;

        Ok(Blog::from_row(row, tags))
    }
}
