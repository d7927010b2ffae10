use serde::Serialize;
use tracing::error;

use crate::{
    entities::{
        blog::{Blog, BlogDetail},
        pagination::{Pagination, PageRequest, BLOG_LIST},
        project::Project,
    },
    errors::AppError,
    repositories::{blog::BlogRepository, project::ProjectRepository},
    settings::AppConfig,
    use_cases::{blog::BlogHandler, project::ProjectHandler},
};

pub const PROJECTS_LOAD_FAILED: &str = "Failed to load projects";
pub const BLOGS_LOAD_FAILED: &str = "Failed to load blogs";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageData {
    pub show_blogs: bool,
    pub resume_url: Option<String>,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsPageData {
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListPageData {
    pub blogs: Vec<Blog>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPageData {
    pub blog: BlogDetail,
}

pub fn home_page(config: &AppConfig) -> HomePageData {
    HomePageData {
        show_blogs: config.show_blogs,
        resume_url: config.resume_url(),
        version: env!("CARGO_PKG_VERSION"),
    }
}

/// Load failures degrade to an empty list with an `error` message.
pub async fn projects_page<R>(projects: &ProjectHandler<R>) -> ProjectsPageData
where
    R: ProjectRepository + ?Sized,
{
    match projects.list_all_projects().await {
        Ok(projects) => ProjectsPageData { projects, error: None },
        Err(e) => {
            error!("Error loading projects: {}", e);
            ProjectsPageData {
                projects: Vec::new(),
                error: Some(PROJECTS_LOAD_FAILED.to_string()),
            }
        }
    }
}

/// Fixed page size; load failures degrade to an empty page with an `error` message.
pub async fn blog_list_page<R>(blogs: &BlogHandler<R>, page: Option<&str>) -> BlogListPageData
where
    R: BlogRepository + ?Sized,
{
    let request = PageRequest::from_page_param(page, BLOG_LIST);

    match blogs.list_published_blogs(request).await {
        Ok(page) => BlogListPageData {
            blogs: page.items,
            pagination: page.pagination,
            error: None,
        },
        Err(e) => {
            error!("Error loading blogs: {}", e);
            BlogListPageData {
                blogs: Vec::new(),
                pagination: Pagination::empty(BLOG_LIST),
                error: Some(BLOGS_LOAD_FAILED.to_string()),
            }
        }
    }
}

/// Missing and unpublished posts are `NotFound`; anything else is logged and
/// surfaces as an internal error.
pub async fn blog_page<R>(blogs: &BlogHandler<R>, slug: &str) -> Result<BlogPageData, AppError>
where
    R: BlogRepository + ?Sized,
{
    match blogs.get_blog_by_slug(slug).await {
        Ok(blog) => Ok(BlogPageData { blog }),
        Err(e) if e.is_not_found() => Err(e),
        Err(e) => {
            error!("Error loading blog post: {}", e);
            Err(AppError::InternalError("Error loading blog post".to_string()))
        }
    }
}
