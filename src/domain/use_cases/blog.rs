use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        blog::{Blog, BlogDetail, BlogSitemapEntry, NewBlog},
        pagination::{ListQuery, Page, PageRequest, BLOG_LIST},
    },
    errors::AppError,
    repositories::blog::BlogRepository,
    use_cases::pagination::load_page,
};

pub struct BlogHandler<R>
where
    R: BlogRepository + ?Sized,
{
    pub blog_repo: Arc<R>,
}

impl<R> BlogHandler<R>
where
    R: BlogRepository + ?Sized,
{
    pub fn new(blog_repo: Arc<R>) -> Self {
        BlogHandler { blog_repo }
    }

    pub async fn list_blogs(&self, query: &ListQuery) -> Result<Page<Blog>, AppError> {
        self.list_published_blogs(PageRequest::from_query(query, BLOG_LIST))
            .await
    }

    /// Published posts only, most recently published first.
    pub async fn list_published_blogs(&self, request: PageRequest) -> Result<Page<Blog>, AppError> {
        load_page(
            request,
            self.blog_repo.list_published_blogs(request.window()),
            self.blog_repo.count_published_blogs(),
        )
        .await
    }

    /// Retrieves a published post with its rendered content. Drafts are
    /// indistinguishable from missing posts.
    pub async fn get_blog_by_slug(&self, slug: &str) -> Result<BlogDetail, AppError> {
        self.blog_repo
            .get_published_blog_by_slug(slug.trim())
            .await?
            .map(Blog::into_detail)
            .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))
    }

    pub async fn sitemap_entries(&self) -> Result<Vec<BlogSitemapEntry>, AppError> {
        self.blog_repo.list_sitemap_entries().await
    }

    /// Fills in slug, reading time and publish date before validating.
    pub async fn create_blog(&self, blog: NewBlog) -> Result<Blog, AppError> {
        let blog = blog.prepare(Utc::now());
        blog.validate()?;
        self.blog_repo.create_blog(&blog).await
    }
}
