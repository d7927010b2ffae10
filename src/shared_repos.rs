use std::sync::Arc;

use crate::repositories::{
    blog::BlogRepository,
    contact::ContactRepository,
    experience::ExperienceRepository,
    in_memory::InMemoryPortfolioStore,
    maintenance::MaintenanceRepository,
    project::ProjectRepository,
    sqlx_repo::{
        SqlxBlogRepo, SqlxContactRepo, SqlxExperienceRepo, SqlxMaintenanceRepo, SqlxProjectRepo,
        SqlxTagRepo,
    },
    tag::TagRepository,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub experience_repo: Arc<dyn ExperienceRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub blog_repo: Arc<dyn BlogRepository>,
    pub tag_repo: Arc<dyn TagRepository>,
    pub contact_repo: Arc<dyn ContactRepository>,
    pub maintenance_repo: Arc<dyn MaintenanceRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            experience_repo: Arc::new(SqlxExperienceRepo::new(pool.clone())),
            project_repo: Arc::new(SqlxProjectRepo::new(pool.clone())),
            blog_repo: Arc::new(SqlxBlogRepo::new(pool.clone())),
            tag_repo: Arc::new(SqlxTagRepo::new(pool.clone())),
            contact_repo: Arc::new(SqlxContactRepo::new(pool.clone())),
            maintenance_repo: Arc::new(SqlxMaintenanceRepo::new(pool)),
        }
    }

    /// Every repository backed by the same in-memory store.
    pub fn in_memory(store: InMemoryPortfolioStore) -> Self {
        SharedRepositories {
            experience_repo: Arc::new(store.clone()),
            project_repo: Arc::new(store.clone()),
            blog_repo: Arc::new(store.clone()),
            tag_repo: Arc::new(store.clone()),
            contact_repo: Arc::new(store.clone()),
            maintenance_repo: Arc::new(store),
        }
    }
}
