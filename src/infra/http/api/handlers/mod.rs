//! API handlers organized by resource type.
//!
//! Error conversions shared by the resource modules live here.

mod categories;
mod documents;
mod posts;
mod services;

pub use categories::*;
pub use documents::*;
pub use posts::*;
pub use services::*;

use axum::http::StatusCode;

use crate::application::categories::{CategorizeError, CategoryError};
use crate::application::documents::DocumentError;
use crate::application::posts::PostError;
use crate::application::repos::RepoError;

use super::error::{ApiError, codes};

pub(crate) fn repo_to_api(err: RepoError) -> ApiError {
    match err {
        RepoError::Duplicate { constraint } => {
            ApiError::new(StatusCode::CONFLICT, codes::DUPLICATE, "Duplicate record")
                .with_hint(constraint)
        }
        RepoError::NotFound => ApiError::not_found("resource not found"),
        RepoError::InvalidInput { message } => {
            ApiError::new(StatusCode::BAD_REQUEST, codes::INVALID_INPUT, "Invalid input")
                .with_hint(message)
        }
        RepoError::Integrity { message } => ApiError::new(
            StatusCode::CONFLICT,
            codes::INTEGRITY,
            "Integrity constraint violated",
        )
        .with_hint(message),
        RepoError::Timeout => ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            codes::DB_TIMEOUT,
            "Database timeout",
        ),
        RepoError::Persistence(message) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::REPO,
            "Persistence error",
        )
        .with_hint(message),
    }
}

pub(crate) fn document_to_api(err: DocumentError) -> ApiError {
    match err {
        DocumentError::NotFound { kind } => {
            ApiError::not_found("document not found").with_hint(kind.as_str())
        }
        DocumentError::DuplicateReference(err) => ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            codes::DUPLICATE_REFERENCE,
            "Each service may be selected by only one service card",
        )
        .with_hint(err.to_string()),
        DocumentError::ConstraintViolation(field) => {
            ApiError::new(StatusCode::BAD_REQUEST, codes::INVALID_INPUT, "Invalid document")
                .with_hint(field)
        }
        DocumentError::Section(err) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::SECTION,
            "Section could not be stored",
        )
        .with_hint(err.to_string()),
        DocumentError::Repo(repo) => repo_to_api(repo),
    }
}

pub(crate) fn post_to_api(err: PostError) -> ApiError {
    match err {
        PostError::NotFound => ApiError::not_found("post not found"),
        PostError::ConstraintViolation(field) => {
            ApiError::new(StatusCode::BAD_REQUEST, codes::INVALID_INPUT, "Invalid post")
                .with_hint(field)
        }
        PostError::UnknownCategory => ApiError::new(
            StatusCode::BAD_REQUEST,
            codes::UNKNOWN_CATEGORY,
            "Category does not exist",
        ),
        PostError::Categorize(CategorizeError::Repo(repo)) => repo_to_api(repo),
        PostError::Categorize(err) => ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            codes::CATEGORIZE,
            "Post could not be categorized",
        )
        .with_hint(err.to_string()),
        PostError::Repo(repo) => repo_to_api(repo),
    }
}

pub(crate) fn category_to_api(err: CategoryError) -> ApiError {
    match err {
        CategoryError::ConstraintViolation(field) => {
            ApiError::new(StatusCode::BAD_REQUEST, codes::INVALID_INPUT, "Invalid category")
                .with_hint(field)
        }
        CategoryError::Repo(repo) => repo_to_api(repo),
    }
}
