use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, limiter, mail, utils};

use limiter::rate_limiter::{RateLimitConfig, SlidingWindowLimiter};
use mail::mailer::Mailer;
use repositories::{
    blog::BlogRepository, contact::ContactRepository, experience::ExperienceRepository,
    maintenance::MaintenanceRepository, project::ProjectRepository, tag::TagRepository,
};
use shared_repos::SharedRepositories;
use use_cases::{
    blog::BlogHandler, contact::ContactHandler, experience::ExperienceHandler,
    project::ProjectHandler, tags::TagHandler,
};

pub struct AppState {
    pub config: settings::AppConfig,
    pub experience_handler: ExperienceHandler<dyn ExperienceRepository>,
    pub project_handler: ProjectHandler<dyn ProjectRepository>,
    pub blog_handler: BlogHandler<dyn BlogRepository>,
    pub tag_handler: TagHandler<dyn TagRepository>,
    pub contact_handler: ContactHandler<dyn ContactRepository, dyn Mailer>,
    pub maintenance_repo: Arc<dyn MaintenanceRepository>,
    pub contact_limiter: Arc<SlidingWindowLimiter>,
}

impl AppState {
    pub fn new(config: settings::AppConfig, repos: SharedRepositories, mailer: Arc<dyn Mailer>) -> Self {
        let contact_limiter = Arc::new(SlidingWindowLimiter::new(RateLimitConfig::from(&config)));

        AppState {
            experience_handler: ExperienceHandler::new(repos.experience_repo),
            project_handler: ProjectHandler::new(repos.project_repo),
            blog_handler: BlogHandler::new(repos.blog_repo),
            tag_handler: TagHandler::new(repos.tag_repo),
            contact_handler: ContactHandler::new(repos.contact_repo, mailer),
            maintenance_repo: repos.maintenance_repo,
            contact_limiter,
            config,
        }
    }

    /// Replaces the contact limiter, e.g. with one driven by a test clock.
    pub fn with_contact_limiter(mut self, limiter: Arc<SlidingWindowLimiter>) -> Self {
        self.contact_limiter = limiter;
        self
    }
}
