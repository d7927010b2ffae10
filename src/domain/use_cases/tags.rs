use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::tag::{NewTag, Tag, TechTag},
    errors::AppError,
    repositories::tag::TagRepository,
};

pub struct TagHandler<R>
where
    R: TagRepository + ?Sized,
{
    pub tag_repo: Arc<R>,
}

impl<R> TagHandler<R>
where
    R: TagRepository + ?Sized,
{
    pub fn new(tag_repo: Arc<R>) -> Self {
        TagHandler { tag_repo }
    }

    pub async fn list_tech_tags(&self) -> Result<Vec<TechTag>, AppError> {
        self.tag_repo.list_tech_tags().await
    }

    /// Returns the tag named `tag.name`, creating it on first use.
    pub async fn upsert_tag(&self, tag: NewTag) -> Result<Tag, AppError> {
        tag.validate()?;
        self.tag_repo.upsert_tag(&tag).await
    }

    pub async fn count_tags(&self) -> Result<u64, AppError> {
        self.tag_repo.count_tags().await
    }
}
