use sqlx::error::ErrorKind;

use crate::application::repos::RepoError;

/// Postgres `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::PoolTimedOut => RepoError::Timeout,
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            match db.kind() {
                ErrorKind::UniqueViolation => RepoError::Duplicate {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                },
                ErrorKind::ForeignKeyViolation => RepoError::InvalidInput { message },
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    RepoError::Integrity { message }
                }
                _ if db.code().as_deref() == Some(QUERY_CANCELED) => RepoError::Timeout,
                _ if message.contains("invalid input syntax") => {
                    RepoError::InvalidInput { message }
                }
                _ => RepoError::Persistence(message),
            }
        }
        other => RepoError::from_persistence(other),
    }
}
