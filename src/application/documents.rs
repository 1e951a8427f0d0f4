//! Load and patch content documents through a [`DocumentStore`].

use std::sync::Arc;

use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::repos::{DocumentStore, RepoError};
use crate::domain::{
    documents::ContentDocument, error::MergeError, references::DuplicateReferenceError,
    sections::SectionError, types::DocumentKind,
};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{kind} document not found")]
    NotFound { kind: DocumentKind },
    #[error(transparent)]
    DuplicateReference(#[from] DuplicateReferenceError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("`{0}` must not be empty")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<MergeError> for DocumentError {
    fn from(error: MergeError) -> Self {
        match error {
            MergeError::DuplicateReference(err) => DocumentError::DuplicateReference(err),
            MergeError::Section(err) => DocumentError::Section(err),
            MergeError::ConstraintViolation(field) => DocumentError::ConstraintViolation(field),
        }
    }
}

/// Read-merge-write access to one document kind.
///
/// Concurrent updates of the same document are last-write-wins: two patches
/// that both read before either writes will each be merged against the same
/// base.
pub struct DocumentService<D: ContentDocument> {
    store: Arc<dyn DocumentStore<D>>,
}

impl<D: ContentDocument> Clone for DocumentService<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<D: ContentDocument> DocumentService<D> {
    pub fn new(store: Arc<dyn DocumentStore<D>>) -> Self {
        Self { store }
    }

    pub async fn load(&self, id: Option<Uuid>) -> Result<D::View, DocumentError> {
        self.load_record(id).await.map(|record| record.view())
    }

    /// Loads the stored record. `None` addresses a singleton, which is
    /// created with its default content when no row exists yet.
    pub async fn load_record(&self, id: Option<Uuid>) -> Result<D, DocumentError> {
        if let Some(record) = self.store.load(id).await? {
            return Ok(record);
        }

        let not_found = DocumentError::NotFound { kind: D::KIND };
        if id.is_some() || !D::KIND.is_singleton() {
            return Err(not_found);
        }
        let Some(initial) = D::initial(Uuid::new_v4(), OffsetDateTime::now_utc()) else {
            return Err(not_found);
        };

        match self.store.save(initial).await {
            Ok(created) => {
                info!(
                    target = "brochure::application::documents",
                    kind = %D::KIND,
                    id = %created.id(),
                    "initialised singleton document"
                );
                Ok(created)
            }
            Err(RepoError::Duplicate { constraint }) => {
                debug!(
                    target = "brochure::application::documents",
                    kind = %D::KIND,
                    constraint = %constraint,
                    "singleton created concurrently; using the stored row"
                );
                self.store.load(None).await?.ok_or(not_found)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Stores a new document as given.
    pub async fn create(&self, mut document: D) -> Result<D::View, DocumentError> {
        document.touch(OffsetDateTime::now_utc());
        let saved = self.store.save(document).await?;
        info!(
            target = "brochure::application::documents",
            kind = %D::KIND,
            id = %saved.id(),
            "document created"
        );
        Ok(saved.view())
    }

    /// Applies a patch: present fields replace, absent fields keep their
    /// stored value. A rejected patch writes nothing.
    pub async fn update(&self, id: Option<Uuid>, patch: D::Patch) -> Result<D::View, DocumentError> {
        let current = self.load_record(id).await?;
        let mut merged = current.merge(patch)?;
        merged.touch(OffsetDateTime::now_utc());

        let saved = self.store.save(merged).await?;
        info!(
            target = "brochure::application::documents",
            kind = %D::KIND,
            id = %saved.id(),
            "document updated"
        );
        Ok(saved.view())
    }
}
