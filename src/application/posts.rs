//! Post editing and the publish/unpublish state machine.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::categories::{CategorizeError, Categorizer};
use crate::application::pagination::{Page, PageRequest};
use crate::application::repos::{
    CategoriesRepo, PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError,
};
use crate::domain::{
    entities::{CategoryRecord, PostRecord},
    patch::Field,
    posts::{NewPost, PostPatch, PublishTransition, requested_category},
    slug::{UniqueSlugError, unique_slug},
};

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error("category does not exist")]
    UnknownCategory,
    #[error(transparent)]
    Categorize(#[from] CategorizeError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: PostRecord,
    pub category: Option<CategoryRecord>,
}

#[derive(Clone)]
pub struct PostService {
    reader: Arc<dyn PostsRepo>,
    writer: Arc<dyn PostsWriteRepo>,
    categories: Arc<dyn CategoriesRepo>,
    categorizer: Categorizer,
}

impl PostService {
    pub fn new(
        reader: Arc<dyn PostsRepo>,
        writer: Arc<dyn PostsWriteRepo>,
        categories: Arc<dyn CategoriesRepo>,
        categorizer: Categorizer,
    ) -> Self {
        Self {
            reader,
            writer,
            categories,
            categorizer,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<PostView, PostError> {
        let post = self.reader.find_by_id(id).await?.ok_or(PostError::NotFound)?;
        self.view(post).await
    }

    pub async fn list(
        &self,
        filter: PostQueryFilter,
        page: PageRequest,
    ) -> Result<Page<PostView>, PostError> {
        let posts = self.reader.list_posts(&filter, page).await?;
        let total = self.reader.count_posts(&filter).await?;
        let categories: HashMap<Uuid, CategoryRecord> = self
            .categories
            .list_categories()
            .await?
            .into_iter()
            .map(|category| (category.id, category))
            .collect();

        Ok(Page::new(posts, page, total).map(|post| {
            let category = post
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            PostView { post, category }
        }))
    }

    pub async fn create(&self, command: NewPost) -> Result<PostView, PostError> {
        let title = command.title.trim().to_string();
        if title.is_empty() {
            return Err(PostError::ConstraintViolation("title"));
        }

        let slug = match requested_slug(command.slug.as_deref()) {
            Some(slug) => slug.to_string(),
            None => self.free_slug(&title, None).await?,
        };

        let now = OffsetDateTime::now_utc();
        let mut post = PostRecord {
            id: Uuid::new_v4(),
            title,
            slug,
            content: command.content,
            excerpt: command.excerpt,
            featured_image: command.featured_image,
            published: false,
            published_at: None,
            category_id: None,
            created_at: now,
            updated_at: now,
        };

        if command.published {
            let bucket = self.categorizer.categorize(now).await?;
            post.mark_published(now, bucket);
        } else if let Some(raw) = requested_category(command.category_id.as_deref()) {
            let category = self
                .existing_category(raw)
                .await?
                .ok_or(PostError::UnknownCategory)?;
            post.category_id = Some(category);
        }

        let created = self.writer.create_post(post).await?;
        info!(
            target = "brochure::application::posts",
            post = %created.id,
            slug = %created.slug,
            published = created.published,
            "post created"
        );
        self.view(created).await
    }

    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<PostView, PostError> {
        let mut post = self.reader.find_by_id(id).await?.ok_or(PostError::NotFound)?;
        let PostPatch {
            title,
            slug,
            content,
            excerpt,
            featured_image,
            published,
            category_id,
        } = patch;

        let mut title_changed = false;
        if let Field::Present(title) = title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(PostError::ConstraintViolation("title"));
            }
            title_changed = title != post.title;
            post.title = title;
        }

        match slug {
            Field::Present(requested) => {
                post.slug = match requested_slug(requested.as_deref()) {
                    Some(slug) => slug.to_string(),
                    None => self.free_slug(&post.title, Some(post.id)).await?,
                };
            }
            Field::Absent if title_changed => {
                post.slug = self.free_slug(&post.title, Some(post.id)).await?;
            }
            Field::Absent => {}
        }

        content.merge_into(&mut post.content);
        excerpt.merge_into(&mut post.excerpt);
        featured_image.merge_into(&mut post.featured_image);

        let now = OffsetDateTime::now_utc();
        let requested = published.into_present();
        match PublishTransition::between(post.published, requested) {
            PublishTransition::Publish => {
                let bucket = self.categorizer.categorize(now).await?;
                post.mark_published(now, bucket);
            }
            PublishTransition::Unpublish => {
                post.mark_draft();
                self.apply_category(&mut post, category_id).await?;
            }
            // Re-publishing keeps the original instant and bucket.
            PublishTransition::Keep if requested == Some(true) => {}
            PublishTransition::Keep => self.apply_category(&mut post, category_id).await?,
        }
        post.updated_at = now;

        let updated = self.writer.update_post(post).await?;
        info!(
            target = "brochure::application::posts",
            post = %updated.id,
            published = updated.published,
            "post updated"
        );
        self.view(updated).await
    }

    /// Publishes a draft at `at` (now when absent), bucketing it by that
    /// instant. Publishing a published post changes nothing.
    pub async fn publish(
        &self,
        id: Uuid,
        at: Option<OffsetDateTime>,
    ) -> Result<PostView, PostError> {
        let mut post = self.reader.find_by_id(id).await?.ok_or(PostError::NotFound)?;
        if post.published {
            return self.view(post).await;
        }

        let at = at.unwrap_or_else(OffsetDateTime::now_utc);
        let bucket = self.categorizer.categorize(at).await?;
        post.mark_published(at, bucket);
        post.updated_at = OffsetDateTime::now_utc();

        let updated = self.writer.update_post(post).await?;
        info!(
            target = "brochure::application::posts",
            post = %updated.id,
            category = ?updated.category_id,
            "post published"
        );
        self.view(updated).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), PostError> {
        match self.writer.delete_post(id).await {
            Ok(()) => {
                info!(target = "brochure::application::posts", post = %id, "post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(PostError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    async fn view(&self, post: PostRecord) -> Result<PostView, PostError> {
        let category = match post.category_id {
            Some(id) => self.categories.find_category(id).await?,
            None => None,
        };
        Ok(PostView { post, category })
    }

    async fn apply_category(
        &self,
        post: &mut PostRecord,
        requested: Field<Option<String>>,
    ) -> Result<(), PostError> {
        let Field::Present(raw) = requested else {
            return Ok(());
        };

        match requested_category(raw.as_deref()) {
            None => post.category_id = None,
            Some(raw) => match self.existing_category(raw).await? {
                Some(category) => post.category_id = Some(category),
                None => warn!(
                    target = "brochure::application::posts",
                    post = %post.id,
                    category = raw,
                    "ignoring unknown category"
                ),
            },
        }
        Ok(())
    }

    async fn existing_category(&self, raw: &str) -> Result<Option<Uuid>, PostError> {
        let Ok(id) = Uuid::parse_str(raw) else {
            return Ok(None);
        };
        Ok(self
            .categories
            .find_category(id)
            .await?
            .map(|category| category.id))
    }

    /// A slug derived from `title` that no other post uses.
    async fn free_slug(&self, title: &str, own_id: Option<Uuid>) -> Result<String, PostError> {
        let reader = self.reader.clone();
        let result = unique_slug(title, move |candidate| {
            let reader = reader.clone();
            let candidate = candidate.to_string();
            async move {
                reader
                    .find_by_slug(&candidate)
                    .await
                    .map(|existing| existing.is_none_or(|post| Some(post.id) == own_id))
            }
        })
        .await;

        match result {
            Ok(slug) => Ok(slug),
            Err(UniqueSlugError::Slug(_)) => Err(PostError::ConstraintViolation("slug")),
            Err(UniqueSlugError::Lookup(err)) => Err(PostError::Repo(err)),
        }
    }
}

fn requested_slug(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|slug| !slug.is_empty())
}
