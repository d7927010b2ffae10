use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    entities::{
        tag::{NewTag, Tag},
        validation::{validate_asset_url, validate_asset_urls, validate_slug, validate_title},
    },
    utils::markdown::safe_markdown_to_html,
};

// ───── Constants ──────────────────────────────────────────────────────
const MIN_TITLE_LENGTH: u64 = 3;
const MAX_TITLE_LENGTH: u64 = 120;
const MIN_SLUG_LENGTH: u64 = 3;
const MAX_SLUG_LENGTH: u64 = 80;
const MAX_EXCERPT_LENGTH: u64 = 300;
const WORDS_PER_MINUTE: usize = 200;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub featured: bool,
    pub reading_time: Option<i32>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub featured: bool,
    pub reading_time: Option<i32>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDetail {
    #[serde(flatten)]
    pub blog: Blog,
    pub content_html: String,
}

/// Published post reference rendered into the sitemap.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct BlogSitemapEntry {
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl BlogSitemapEntry {
    /// Value reported as the sitemap `lastmod`.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    #[validate(
        length(min = MIN_TITLE_LENGTH, max = MAX_TITLE_LENGTH),
        custom(function = "validate_title")
    )]
    pub title: String,

    #[validate(
        length(min = MIN_SLUG_LENGTH, max = MAX_SLUG_LENGTH),
        custom(function = "validate_slug")
    )]
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    #[validate(length(max = MAX_EXCERPT_LENGTH))]
    #[serde(default)]
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: String,

    #[validate(custom(function = "validate_asset_url"))]
    #[serde(default)]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_asset_urls"))]
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub featured: bool,

    #[validate(range(min = 1))]
    #[serde(default)]
    pub reading_time: Option<i32>,

    #[validate(nested)]
    #[serde(default)]
    pub tags: Vec<NewTag>,
}

impl NewBlog {
    /// Fills derived fields: slug from title, reading time from content and
    /// the publish timestamp of published posts.
    pub fn prepare(mut self, now: DateTime<Utc>) -> Self {
        if self.slug.as_deref().map_or(true, |s| s.trim().is_empty()) {
            self.slug = Some(slug::slugify(&self.title));
        }
        if self.reading_time.is_none() {
            self.reading_time = Some(estimate_reading_time(&self.content));
        }
        if self.published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self
    }

    pub fn slug_or_default(&self) -> String {
        self.slug
            .clone()
            .unwrap_or_else(|| slug::slugify(&self.title))
    }
}

/// Minutes to read `content` at 200 words per minute, never less than one.
pub fn estimate_reading_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as i32
}

// ───── Conversions ──────────────────────────────────────────────────

impl Blog {
    /// Single normalization point for stored posts.
    pub fn from_row(row: BlogRow, tags: Vec<Tag>) -> Self {
        Blog {
            id: row.id,
            title: row.title,
            slug: row.slug,
            description: row.description,
            excerpt: row.excerpt.filter(|e| !e.trim().is_empty()),
            content: row.content,
            image_url: row.image_url.filter(|u| !u.trim().is_empty()),
            images: row.images.unwrap_or_default(),
            published: row.published,
            published_at: row.published_at,
            featured: row.featured,
            reading_time: row.reading_time,
            views: row.views,
            created_at: row.created_at,
            updated_at: row.updated_at,
            tags,
        }
    }

    pub fn into_detail(self) -> BlogDetail {
        let content_html = safe_markdown_to_html(&self.content);
        BlogDetail {
            blog: self,
            content_html,
        }
    }
}
