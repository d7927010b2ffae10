use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        pagination::{ListQuery, Page, PageRequest, PROJECT_LIST},
        project::{NewProject, Project, ProjectFilter, ProjectOrdering},
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::pagination::load_page,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub project_repo: Arc<R>,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub fn new(project_repo: Arc<R>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Paged listing with featured projects first; `featured=true` keeps only those.
    pub async fn list_projects(&self, query: &ListQuery) -> Result<Page<Project>, AppError> {
        let request = PageRequest::from_query(query, PROJECT_LIST);
        let filter = ProjectFilter {
            featured_only: query.featured_only(),
        };

        load_page(
            request,
            self.project_repo
                .list_projects(filter, ProjectOrdering::FeaturedFirst, Some(request.window())),
            self.project_repo.count_projects(filter),
        )
        .await
    }

    /// Every project in manual rank order, for the projects page.
    pub async fn list_all_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo
            .list_projects(ProjectFilter::default(), ProjectOrdering::ManualRank, None)
            .await
    }

    pub async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        project.validate()?;
        self.project_repo.create_project(&project).await
    }
}
