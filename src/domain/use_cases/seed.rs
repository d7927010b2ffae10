use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    entities::{blog::NewBlog, experience::NewExperience, project::NewProject},
    errors::{AppError, FieldError},
    repositories::{
        blog::BlogRepository, experience::ExperienceRepository, maintenance::MaintenanceRepository,
        project::ProjectRepository, tag::TagRepository,
    },
    shared_repos::SharedRepositories,
    use_cases::{
        blog::BlogHandler, experience::ExperienceHandler, project::ProjectHandler, tags::TagHandler,
    },
};

/// Content document loaded by the `seed` binary. Every entity lists its tags
/// by full definition; tags are connected by name or created.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub experiences: Vec<NewExperience>,
    #[serde(default)]
    pub projects: Vec<NewProject>,
    #[serde(default)]
    pub blogs: Vec<NewBlog>,
}

impl SeedData {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidInput(format!("Invalid seed document: {}", e)))
    }

    /// Checks every entry before anything is written. Field paths are
    /// prefixed with the entry, e.g. `experiences[1].endDate`.
    pub fn validate_all(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        collect("experiences", &self.experiences, &mut problems);
        collect("projects", &self.projects, &mut problems);
        collect("blogs", &self.blogs, &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(problems))
        }
    }
}

fn collect<T: Validate>(kind: &str, items: &[T], out: &mut Vec<FieldError>) {
    for (index, item) in items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            if let AppError::ValidationError(fields) = AppError::from(errors) {
                out.extend(fields.into_iter().map(|f| FieldError {
                    field: format!("{}[{}].{}", kind, index, f.field),
                    message: f.message,
                }));
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub experiences: usize,
    pub projects: usize,
    pub blogs: usize,
    pub tags: u64,
}

pub struct Seeder {
    experiences: ExperienceHandler<dyn ExperienceRepository>,
    projects: ProjectHandler<dyn ProjectRepository>,
    blogs: BlogHandler<dyn BlogRepository>,
    tags: TagHandler<dyn TagRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
}

impl Seeder {
    pub fn new(repos: &SharedRepositories) -> Self {
        Seeder {
            experiences: ExperienceHandler::new(repos.experience_repo.clone()),
            projects: ProjectHandler::new(repos.project_repo.clone()),
            blogs: BlogHandler::new(repos.blog_repo.clone()),
            tags: TagHandler::new(repos.tag_repo.clone()),
            maintenance: repos.maintenance_repo.clone(),
        }
    }

    /// Inserts the whole document. With `reset`, existing content (not
    /// contacts) is cleared first. Nothing is written if any entry is invalid.
    pub async fn seed(&self, data: SeedData, reset: bool) -> Result<SeedReport, AppError> {
        let now = Utc::now();
        let data = SeedData {
            blogs: data.blogs.into_iter().map(|b| b.prepare(now)).collect(),
            ..data
        };
        data.validate_all()?;

        if reset {
            info!("Cleaning existing content...");
            self.maintenance.clear_content().await?;
        }

        let mut report = SeedReport::default();

        for experience in data.experiences {
            let created = self.experiences.create_experience(experience).await?;
            info!("Created experience {} ({})", created.id, created.title);
            report.experiences += 1;
        }

        for project in data.projects {
            let created = self.projects.create_project(project).await?;
            info!("Created project {} ({})", created.id, created.title);
            report.projects += 1;
        }

        for blog in data.blogs {
            let created = self.blogs.create_blog(blog).await?;
            info!("Created blog {} ({})", created.id, created.slug);
            report.blogs += 1;
        }

        report.tags = self.tags.count_tags().await?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::in_memory::InMemoryPortfolioStore;

    const DOCUMENT: &str = r#"{
        "experiences": [{
            "title": "Software Engineer",
            "role": "Backend",
            "company": "Acme",
            "location": "Remote",
            "content": "APIs",
            "highlights": ["Shipped things"],
            "startDate": "2023-04-01",
            "tags": [{"name": "Rust", "iconUrl": "/images/tags/icon/rust.svg", "isTech": true}]
        }],
        "projects": [{
            "title": "Sites",
            "imageUrl": "/images/projects/sites.png",
            "order": 1,
            "tags": [{"name": "Rust", "iconUrl": "/images/tags/icon/rust.svg", "isTech": true}]
        }],
        "blogs": [{
            "title": "Hello World",
            "content": "first post",
            "published": true,
            "tags": [{"name": "Writing", "iconUrl": null}]
        }]
    }"#;

    #[tokio::test]
    async fn seeds_document_and_shares_tags_by_name() {
        let store = InMemoryPortfolioStore::new();
        let seeder = Seeder::new(&SharedRepositories::in_memory(store.clone()));

        let report = seeder
            .seed(SeedData::from_json(DOCUMENT).unwrap(), false)
            .await
            .unwrap();

        assert_eq!(
            report,
            SeedReport { experiences: 1, projects: 1, blogs: 1, tags: 2 }
        );
        assert_eq!(store.tags().iter().filter(|t| t.name == "Rust").count(), 1);
    }

    #[tokio::test]
    async fn invalid_entry_aborts_before_writing() {
        let mut data = SeedData::from_json(DOCUMENT).unwrap();
        data.experiences[0].end_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1);

        let store = InMemoryPortfolioStore::new();
        let seeder = Seeder::new(&SharedRepositories::in_memory(store.clone()));
        let err = seeder.seed(data, false).await.unwrap_err();

        match err {
            AppError::ValidationError(fields) => {
                assert!(fields.iter().all(|f| f.field.starts_with("experiences[0].")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.tags().is_empty());
    }

    #[test]
    fn nested_tag_errors_carry_their_path() {
        let mut data = SeedData::from_json(DOCUMENT).unwrap();
        data.projects[0].tags[0].name = String::new();

        let err = data.validate_all().unwrap_err();
        match err {
            AppError::ValidationError(fields) => {
                assert_eq!(fields[0].field, "projects[0].tags[0].name");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_document_is_invalid_input() {
        assert!(matches!(SeedData::from_json("{"), Err(AppError::InvalidInput(_))));
    }
}
