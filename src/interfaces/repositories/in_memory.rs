use std::{cmp::Reverse, collections::HashSet, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    entities::{
        blog::{Blog, BlogRow, BlogSitemapEntry, NewBlog},
        contact::{Contact, NewContact},
        experience::{Experience, ExperienceRow, NewExperience},
        pagination::PageWindow,
        project::{NewProject, Project, ProjectFilter, ProjectOrdering, ProjectRow},
        tag::{NewTag, Tag, TechTag},
    },
    errors::AppError,
    repositories::{
        blog::BlogRepository, contact::ContactRepository, experience::ExperienceRepository,
        maintenance::MaintenanceRepository, project::ProjectRepository, tag::TagRepository,
    },
};

#[derive(Default)]
struct StoreData {
    next_id: i32,
    tags: Vec<Tag>,
    experiences: Vec<(ExperienceRow, Vec<i32>)>,
    projects: Vec<(ProjectRow, Vec<i32>)>,
    blogs: Vec<(BlogRow, Vec<i32>)>,
    contacts: Vec<Contact>,
}

impl StoreData {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn upsert_tag(&mut self, new_tag: &NewTag) -> Tag {
        let name = new_tag.name.trim();
        if let Some(existing) = self.tags.iter().find(|t| t.name == name) {
            return existing.clone();
        }

        let now = Utc::now();
        let tag = Tag {
            id: self.next_id(),
            name: name.to_string(),
            icon_url: new_tag.icon_url.clone(),
            is_tech: new_tag.is_tech,
            created_at: now,
            updated_at: now,
        };
        self.tags.push(tag.clone());
        tag
    }

    fn upsert_tags(&mut self, tags: &[NewTag]) -> Vec<i32> {
        let mut ids = Vec::with_capacity(tags.len());
        let mut seen = HashSet::new();
        for tag in tags {
            let id = self.upsert_tag(tag).id;
            if seen.insert(id) {
                ids.push(id);
            }
        }
        ids
    }

    fn resolve_tags(&self, ids: &[i32]) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .tags
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }
}

fn apply_window<T>(items: Vec<T>, window: Option<PageWindow>) -> Vec<T> {
    match window {
        Some(window) => {
            let skip = usize::try_from(window.offset).unwrap_or(usize::MAX);
            let take = usize::try_from(window.limit).unwrap_or(0);
            items.into_iter().skip(skip).take(take).collect()
        }
        None => items,
    }
}

/// Thread-safe in-memory implementation of every repository trait, suitable
/// for tests and local runs without a database. Orderings and filters mirror
/// the SQL implementations.
#[derive(Clone, Default)]
pub struct InMemoryPortfolioStore {
    data: Arc<RwLock<StoreData>>,
}

impl InMemoryPortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.data.read().tags.clone()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.data.read().contacts.clone()
    }
}

#[async_trait]
impl ExperienceRepository for InMemoryPortfolioStore {
    async fn list_experiences(&self, window: PageWindow) -> Result<Vec<Experience>, AppError> {
        let data = self.data.read();
        let mut rows: Vec<&(ExperienceRow, Vec<i32>)> = data
            .experiences
            .iter()
            .filter(|(row, _)| !row.is_hidden)
            .collect();
        rows.sort_by_key(|(row, _)| (Reverse(row.start_date), row.id));

        Ok(apply_window(rows, Some(window))
            .into_iter()
            .map(|(row, tag_ids)| Experience::from_row(row.clone(), data.resolve_tags(tag_ids)))
            .collect())
    }

    async fn count_experiences(&self) -> Result<u64, AppError> {
        let data = self.data.read();
        Ok(data
            .experiences
            .iter()
            .filter(|(row, _)| !row.is_hidden)
            .count() as u64)
    }

    async fn get_experience_by_id(&self, id: i32) -> Result<Option<Experience>, AppError> {
        let data = self.data.read();
        Ok(data
            .experiences
            .iter()
            .find(|(row, _)| row.id == id && !row.is_hidden)
            .map(|(row, tag_ids)| Experience::from_row(row.clone(), data.resolve_tags(tag_ids))))
    }

    async fn create_experience(&self, experience: &NewExperience) -> Result<Experience, AppError> {
        let mut data = self.data.write();
        let tag_ids = data.upsert_tags(&experience.tags);
        let now = Utc::now();
        let row = ExperienceRow {
            id: data.next_id(),
            title: experience.title.clone(),
            role: experience.role.clone(),
            company: experience.company.clone(),
            location: experience.location.clone(),
            content: experience.content.clone(),
            highlights: Some(experience.highlights.clone()),
            start_date: experience.start_date,
            end_date: experience.end_date,
            is_hidden: experience.is_hidden,
            created_at: now,
            updated_at: now,
        };
        let created = Experience::from_row(row.clone(), data.resolve_tags(&tag_ids));
        data.experiences.push((row, tag_ids));
        Ok(created)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryPortfolioStore {
    async fn list_projects(
        &self,
        filter: ProjectFilter,
        ordering: ProjectOrdering,
        window: Option<PageWindow>,
    ) -> Result<Vec<Project>, AppError> {
        let data = self.data.read();
        let mut rows: Vec<&(ProjectRow, Vec<i32>)> = data
            .projects
            .iter()
            .filter(|(row, _)| !filter.featured_only || row.featured)
            .collect();

        match ordering {
            ProjectOrdering::FeaturedFirst => {
                rows.sort_by_key(|(row, _)| (Reverse(row.featured), row.order, row.id));
            }
            ProjectOrdering::ManualRank => {
                rows.sort_by_key(|(row, _)| (row.order, row.id));
            }
        }

        Ok(apply_window(rows, window)
            .into_iter()
            .map(|(row, tag_ids)| Project::from_row(row.clone(), data.resolve_tags(tag_ids)))
            .collect())
    }

    async fn count_projects(&self, filter: ProjectFilter) -> Result<u64, AppError> {
        let data = self.data.read();
        Ok(data
            .projects
            .iter()
            .filter(|(row, _)| !filter.featured_only || row.featured)
            .count() as u64)
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, AppError> {
        let mut data = self.data.write();
        let tag_ids = data.upsert_tags(&project.tags);
        let now = Utc::now();
        let row = ProjectRow {
            id: data.next_id(),
            title: project.title.clone(),
            subtitle: project.subtitle.clone(),
            description: project.description.clone(),
            image_url: project.image_url.clone(),
            thumbnail_url: project.thumbnail_url.clone(),
            images: (!project.images.is_empty()).then(|| project.images.clone()),
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
            featured: project.featured,
            order: project.order,
            created_at: now,
            updated_at: now,
        };
        let created = Project::from_row(row.clone(), data.resolve_tags(&tag_ids));
        data.projects.push((row, tag_ids));
        Ok(created)
    }
}

impl InMemoryPortfolioStore {
    fn published_blogs(data: &StoreData) -> Vec<&(BlogRow, Vec<i32>)> {
        let mut rows: Vec<&(BlogRow, Vec<i32>)> =
            data.blogs.iter().filter(|(row, _)| row.published).collect();
        // published_at DESC NULLS LAST, id DESC
        rows.sort_by_key(|(row, _)| (row.published_at.is_none(), Reverse(row.published_at), Reverse(row.id)));
        rows
    }
}

#[async_trait]
impl BlogRepository for InMemoryPortfolioStore {
    async fn list_published_blogs(&self, window: PageWindow) -> Result<Vec<Blog>, AppError> {
        let data = self.data.read();
        let rows = Self::published_blogs(&data);

        Ok(apply_window(rows, Some(window))
            .into_iter()
            .map(|(row, tag_ids)| Blog::from_row(row.clone(), data.resolve_tags(tag_ids)))
            .collect())
    }

    async fn count_published_blogs(&self) -> Result<u64, AppError> {
        let data = self.data.read();
        Ok(data.blogs.iter().filter(|(row, _)| row.published).count() as u64)
    }

    async fn get_published_blog_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError> {
        let data = self.data.read();
        Ok(data
            .blogs
            .iter()
            .find(|(row, _)| row.slug == slug && row.published)
            .map(|(row, tag_ids)| Blog::from_row(row.clone(), data.resolve_tags(tag_ids))))
    }

    async fn list_sitemap_entries(&self) -> Result<Vec<BlogSitemapEntry>, AppError> {
        let data = self.data.read();
        Ok(Self::published_blogs(&data)
            .into_iter()
            .map(|(row, _)| BlogSitemapEntry {
                slug: row.slug.clone(),
                published_at: row.published_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError> {
        let mut data = self.data.write();
        let slug = blog.slug_or_default();
        if data.blogs.iter().any(|(row, _)| row.slug == slug) {
            return Err(AppError::Conflict("Slug already exists".into()));
        }

        let tag_ids = data.upsert_tags(&blog.tags);
        let now = Utc::now();
        let row = BlogRow {
            id: data.next_id(),
            title: blog.title.clone(),
            slug,
            description: blog.description.clone(),
            excerpt: blog.excerpt.clone(),
            content: blog.content.clone(),
            image_url: blog.image_url.clone(),
            images: (!blog.images.is_empty()).then(|| blog.images.clone()),
            published: blog.published,
            published_at: blog.published_at,
            featured: blog.featured,
            reading_time: blog.reading_time,
            views: 0,
            created_at: now,
            updated_at: now,
        };
        let created = Blog::from_row(row.clone(), data.resolve_tags(&tag_ids));
        data.blogs.push((row, tag_ids));
        Ok(created)
    }
}

#[async_trait]
impl TagRepository for InMemoryPortfolioStore {
    async fn upsert_tag(&self, tag: &NewTag) -> Result<Tag, AppError> {
        Ok(self.data.write().upsert_tag(tag))
    }

    async fn list_tech_tags(&self) -> Result<Vec<TechTag>, AppError> {
        let data = self.data.read();
        let mut tags: Vec<TechTag> = data
            .tags
            .iter()
            .filter(|t| t.is_tech)
            .filter_map(|t| {
                t.icon_url.as_ref().map(|icon| TechTag {
                    name: t.name.clone(),
                    icon_url: icon.clone(),
                })
            })
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn count_tags(&self) -> Result<u64, AppError> {
        Ok(self.data.read().tags.len() as u64)
    }
}

#[async_trait]
impl ContactRepository for InMemoryPortfolioStore {
    async fn create_contact(&self, contact: &NewContact) -> Result<Contact, AppError> {
        let mut data = self.data.write();
        let created = Contact {
            id: data.next_id(),
            needs: contact.needs.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            project_type: contact.project_type.clone(),
            budget: contact.budget.clone(),
            additional: contact.additional.clone(),
            created_at: Utc::now(),
        };
        data.contacts.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl MaintenanceRepository for InMemoryPortfolioStore {
    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn clear_content(&self) -> Result<(), AppError> {
        let mut data = self.data.write();
        data.tags.clear();
        data.experiences.clear();
        data.projects.clear();
        data.blogs.clear();
        Ok(())
    }
}
