use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        experience::{Experience, NewExperience},
        pagination::{ListQuery, Page, PageRequest, EXPERIENCE_LIST},
    },
    errors::AppError,
    repositories::experience::ExperienceRepository,
    use_cases::pagination::load_page,
    utils::parse_id::parse_id,
};

pub struct ExperienceHandler<R>
where
    R: ExperienceRepository + ?Sized,
{
    pub experience_repo: Arc<R>,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository + ?Sized,
{
    pub fn new(experience_repo: Arc<R>) -> Self {
        ExperienceHandler { experience_repo }
    }

    /// Lists visible experiences, newest first.
    pub async fn list_experiences(&self, query: &ListQuery) -> Result<Page<Experience>, AppError> {
        let request = PageRequest::from_query(query, EXPERIENCE_LIST);

        load_page(
            request,
            self.experience_repo.list_experiences(request.window()),
            self.experience_repo.count_experiences(),
        )
        .await
    }

    /// Retrieves a visible experience by its path id. Hidden experiences are
    /// reported as missing.
    pub async fn get_experience(&self, id: &str) -> Result<Experience, AppError> {
        let id = parse_id(id)?;

        self.experience_repo
            .get_experience_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))
    }

    pub async fn create_experience(&self, experience: NewExperience) -> Result<Experience, AppError> {
        experience.validate()?;
        self.experience_repo.create_experience(&experience).await
    }
}
