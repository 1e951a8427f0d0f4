//! Categories and the month-bucket categorizer used when posts are published.

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, CreateCategoryParams, RepoError,
};
use crate::domain::{categories::MonthBucket, entities::CategoryRecord, slug::derive_slug};

#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("failed to derive month bucket: {0}")]
    Bucket(#[from] time::error::Format),
    #[error("bucket category `{slug}` was reported as existing but cannot be read")]
    Vanished { slug: String },
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Resolves the year-month bucket category of a publish instant, creating it
/// on first use.
#[derive(Clone)]
pub struct Categorizer {
    reader: Arc<dyn CategoriesRepo>,
    writer: Arc<dyn CategoriesWriteRepo>,
}

impl Categorizer {
    pub fn new(reader: Arc<dyn CategoriesRepo>, writer: Arc<dyn CategoriesWriteRepo>) -> Self {
        Self { reader, writer }
    }

    /// Returns the id of the bucket category for `instant`. Safe to race:
    /// a losing insert re-reads the row the winner created.
    pub async fn categorize(&self, instant: OffsetDateTime) -> Result<Uuid, CategorizeError> {
        let bucket = MonthBucket::from_instant(instant)?;

        if let Some(existing) = self.reader.find_category_by_slug(&bucket.slug).await? {
            debug!(
                target = "brochure::application::categories",
                slug = %bucket.slug,
                category = %existing.id,
                "bucket category exists"
            );
            return Ok(existing.id);
        }

        let params = CreateCategoryParams {
            name: bucket.name.clone(),
            slug: bucket.slug.clone(),
            description: Some(bucket.description.clone()),
        };

        match self.writer.create_category(params).await {
            Ok(created) => {
                info!(
                    target = "brochure::application::categories",
                    slug = %created.slug,
                    category = %created.id,
                    "bucket category created"
                );
                metrics::counter!("brochure_category_bucket_created_total").increment(1);
                Ok(created.id)
            }
            Err(RepoError::Duplicate { .. }) => {
                debug!(
                    target = "brochure::application::categories",
                    slug = %bucket.slug,
                    "bucket category created concurrently; re-reading"
                );
                self.reader
                    .find_category_by_slug(&bucket.slug)
                    .await?
                    .map(|category| category.id)
                    .ok_or(CategorizeError::Vanished { slug: bucket.slug })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCategoryCommand {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct CategoryService {
    reader: Arc<dyn CategoriesRepo>,
    writer: Arc<dyn CategoriesWriteRepo>,
}

impl CategoryService {
    pub fn new(reader: Arc<dyn CategoriesRepo>, writer: Arc<dyn CategoriesWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>, CategoryError> {
        self.reader
            .list_categories()
            .await
            .map_err(CategoryError::from)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<CategoryRecord>, CategoryError> {
        self.reader
            .find_category(id)
            .await
            .map_err(CategoryError::from)
    }

    pub async fn create(
        &self,
        command: CreateCategoryCommand,
    ) -> Result<CategoryRecord, CategoryError> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(CategoryError::ConstraintViolation("name"));
        }

        let slug = match command
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
        {
            Some(slug) => slug.to_string(),
            None => derive_slug(&name).map_err(|_| CategoryError::ConstraintViolation("slug"))?,
        };

        let description = command.description.and_then(|value| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });

        let category = self
            .writer
            .create_category(CreateCategoryParams {
                name,
                slug,
                description,
            })
            .await?;
        info!(
            target = "brochure::application::categories",
            slug = %category.slug,
            category = %category.id,
            "category created"
        );
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRepositories;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use time::macros::datetime;

    fn categorizer(repos: &Arc<InMemoryRepositories>) -> Categorizer {
        Categorizer::new(repos.clone(), repos.clone())
    }

    #[tokio::test]
    async fn first_publish_in_a_month_creates_the_bucket() {
        let repos = Arc::new(InMemoryRepositories::new());
        let id = categorizer(&repos)
            .categorize(datetime!(2024-03-15 10:00 UTC))
            .await
            .expect("bucket");

        let category = repos
            .find_category(id)
            .await
            .expect("read")
            .expect("created");
        assert_eq!(category.name, "2024-03");
        assert_eq!(category.slug, "2024-03");
        assert_eq!(category.description.as_deref(), Some("March 2024"));
    }

    #[tokio::test]
    async fn repeated_publishes_reuse_the_bucket() {
        let repos = Arc::new(InMemoryRepositories::new());
        let categorizer = categorizer(&repos);

        let first = categorizer
            .categorize(datetime!(2024-03-01 00:00 UTC))
            .await
            .expect("bucket");
        let second = categorizer
            .categorize(datetime!(2024-03-31 23:00 UTC))
            .await
            .expect("bucket");
        let other_month = categorizer
            .categorize(datetime!(2024-04-01 00:00 UTC))
            .await
            .expect("bucket");

        assert_eq!(first, second);
        assert_ne!(first, other_month);
        assert_eq!(repos.list_categories().await.expect("list").len(), 2);
    }

    #[tokio::test]
    async fn concurrent_publishes_converge_on_one_category() {
        let repos = Arc::new(InMemoryRepositories::new());
        let instant = datetime!(2025-06-10 12:00 UTC);

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let categorizer = categorizer(&repos);
                tokio::spawn(async move { categorizer.categorize(instant).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.expect("join").expect("bucket"));
        }
        ids.dedup();

        assert_eq!(ids.len(), 1);
        assert_eq!(repos.list_categories().await.expect("list").len(), 1);
    }

    /// Reports nothing on the first lookup, as if another publisher inserted
    /// the bucket between our read and our write.
    struct LateReader {
        inner: Arc<InMemoryRepositories>,
        misses: Mutex<usize>,
    }

    #[async_trait]
    impl CategoriesRepo for LateReader {
        async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError> {
            self.inner.list_categories().await
        }

        async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
            self.inner.find_category(id).await
        }

        async fn find_category_by_slug(
            &self,
            slug: &str,
        ) -> Result<Option<CategoryRecord>, RepoError> {
            {
                let mut misses = self.misses.lock().expect("lock");
                if *misses > 0 {
                    *misses -= 1;
                    return Ok(None);
                }
            }
            self.inner.find_category_by_slug(slug).await
        }
    }

    #[tokio::test]
    async fn losing_insert_uses_the_winners_row() {
        let repos = Arc::new(InMemoryRepositories::new());
        let instant = datetime!(2023-12-24 18:00 UTC);
        let winner = categorizer(&repos)
            .categorize(instant)
            .await
            .expect("winner");

        let reader = Arc::new(LateReader {
            inner: repos.clone(),
            misses: Mutex::new(1),
        });
        let loser = Categorizer::new(reader, repos.clone())
            .categorize(instant)
            .await
            .expect("loser");

        assert_eq!(loser, winner);
        assert_eq!(repos.list_categories().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn category_slug_defaults_from_name() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = CategoryService::new(repos.clone(), repos.clone());

        let category = service
            .create(CreateCategoryCommand {
                name: "Industry News".to_string(),
                slug: None,
                description: Some("  ".to_string()),
            })
            .await
            .expect("create");

        assert_eq!(category.slug, "industry-news");
        assert_eq!(category.description, None);

        let err = service
            .create(CreateCategoryCommand {
                name: "Industry  News".to_string(),
                ..CreateCategoryCommand::default()
            })
            .await
            .expect_err("duplicate slug");
        assert!(matches!(err, CategoryError::Repo(RepoError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn category_name_is_required() {
        let repos = Arc::new(InMemoryRepositories::new());
        let service = CategoryService::new(repos.clone(), repos);

        let err = service
            .create(CreateCategoryCommand::default())
            .await
            .expect_err("blank name");
        assert!(matches!(err, CategoryError::ConstraintViolation("name")));
    }
}
