use thiserror::Error;

use super::{references::DuplicateReferenceError, sections::SectionError};

/// Reasons a patch cannot be merged into a stored document.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    DuplicateReference(#[from] DuplicateReferenceError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error("`{0}` must not be empty")]
    ConstraintViolation(&'static str),
}
