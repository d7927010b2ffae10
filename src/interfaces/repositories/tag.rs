use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::{
    entities::tag::{NewTag, Tag, TagLinkRow, TechTag},
    errors::AppError,
    repositories::sqlx_repo::SqlxTagRepo,
};

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Connect-or-create by unique name.
    async fn upsert_tag(&self, tag: &NewTag) -> Result<Tag, AppError>;
    async fn list_tech_tags(&self) -> Result<Vec<TechTag>, AppError>;
    async fn count_tags(&self) -> Result<u64, AppError>;
}

/// Join table linking an entity kind to its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLink {
    Experience,
    Project,
    Blog,
}

impl TagLink {
    fn table(self) -> &'static str {
        match self {
            TagLink::Experience => "experience_tags",
            TagLink::Project => "project_tags",
            TagLink::Blog => "blog_tags",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            TagLink::Experience => "experience_id",
            TagLink::Project => "project_id",
            TagLink::Blog => "blog_id",
        }
    }
}

const TAG_COLUMNS: &str = "id, name, icon_url, is_tech, created_at, updated_at";

/// Loads the tags of every owner in `owner_ids` with one query, grouped by owner.
pub(crate) async fn load_tags<'e, E>(
    executor: E,
    link: TagLink,
    owner_ids: &[i32],
) -> Result<HashMap<i32, Vec<Tag>>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    if owner_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        r#"
        SELECT l.{owner} AS owner_id, t.id, t.name, t.icon_url, t.is_tech, t.created_at, t.updated_at
        FROM tags t
        JOIN {table} l ON l.tag_id = t.id
        WHERE l.{owner} = ANY($1)
        ORDER BY t.name
        "#,
        owner = link.owner_column(),
        table = link.table(),
    );

    let rows: Vec<TagLinkRow> = sqlx::query_as(&sql)
        .bind(owner_ids)
        .fetch_all(executor)
        .await?;

    let mut grouped: HashMap<i32, Vec<Tag>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.tag);
    }

    Ok(grouped)
}

pub(crate) async fn upsert_tag_on(conn: &mut PgConnection, tag: &NewTag) -> Result<Tag, sqlx::Error> {
    // The no-op update makes RETURNING yield the existing row on conflict
    let sql = format!(
        r#"
        INSERT INTO tags (name, icon_url, is_tech)
        VALUES ($1, $2, $3)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING {TAG_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Tag>(&sql)
        .bind(tag.name.trim())
        .bind(&tag.icon_url)
        .bind(tag.is_tech)
        .fetch_one(&mut *conn)
        .await
}

/// Upserts `tags` and links each to `owner_id`, returning them sorted by name.
pub(crate) async fn attach_tags(
    conn: &mut PgConnection,
    link: TagLink,
    owner_id: i32,
    tags: &[NewTag],
) -> Result<Vec<Tag>, sqlx::Error> {
    let link_sql = format!(
        "INSERT INTO {table} ({owner}, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        table = link.table(),
        owner = link.owner_column(),
    );

    let mut seen = HashSet::new();
    let mut attached = Vec::with_capacity(tags.len());

    for new_tag in tags {
        if !seen.insert(new_tag.name.trim().to_string()) {
            continue;
        }

        let tag = upsert_tag_on(&mut *conn, new_tag).await?;

        sqlx::query(&link_sql)
            .bind(owner_id)
            .bind(tag.id)
            .execute(&mut *conn)
            .await?;

        attached.push(tag);
    }

    attached.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(attached)
}

impl SqlxTagRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxTagRepo { pool }
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepo {
    async fn upsert_tag(&self, tag: &NewTag) -> Result<Tag, AppError> {
        let mut conn = self.pool.acquire().await?;
        let tag = upsert_tag_on(&mut conn, tag).await?;
        Ok(tag)
    }

    async fn list_tech_tags(&self) -> Result<Vec<TechTag>, AppError> {
        let tags = sqlx::query_as::<_, TechTag>(
            r#"
            SELECT name, icon_url
            FROM tags
            WHERE is_tech = TRUE AND icon_url IS NOT NULL
            ORDER BY name
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    async fn count_tags(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
