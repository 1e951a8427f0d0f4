//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::PageRequest;
use crate::domain::entities::{CategoryRecord, PostRecord, ServiceRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Whole-record storage for one document kind.
///
/// `load(None)` addresses the singleton row of a singleton kind. `save`
/// writes the full record in one statement, inserting it when the id is new.
#[async_trait]
pub trait DocumentStore<D>: Send + Sync
where
    D: Send + Sync + 'static,
{
    async fn load(&self, id: Option<Uuid>) -> Result<Option<D>, RepoError>;

    async fn save(&self, document: D) -> Result<D, RepoError>;
}

#[async_trait]
pub trait ServicesRepo: Send + Sync {
    /// Services ordered by `order`, then title.
    async fn list_services(&self, active: Option<bool>) -> Result<Vec<ServiceRecord>, RepoError>;

    async fn find_service_by_slug(&self, slug: &str) -> Result<Option<ServiceRecord>, RepoError>;
}

#[async_trait]
pub trait ServicesWriteRepo: Send + Sync {
    async fn delete_service(&self, id: Uuid) -> Result<(), RepoError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostQueryFilter {
    pub published: Option<bool>,
    pub category_id: Option<Uuid>,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Newest first.
    async fn list_posts(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Vec<PostRecord>, RepoError>;

    async fn count_posts(&self, filter: &PostQueryFilter) -> Result<u64, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, post: PostRecord) -> Result<PostRecord, RepoError>;

    /// Rewrites every column of an existing post.
    async fn update_post(&self, post: PostRecord) -> Result<PostRecord, RepoError>;

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateCategoryParams {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_category(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError>;

    async fn find_category_by_slug(&self, slug: &str)
    -> Result<Option<CategoryRecord>, RepoError>;
}

#[async_trait]
pub trait CategoriesWriteRepo: Send + Sync {
    /// Inserts a category. A taken slug is reported as
    /// [`RepoError::Duplicate`].
    async fn create_category(
        &self,
        params: CreateCategoryParams,
    ) -> Result<CategoryRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
