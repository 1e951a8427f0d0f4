use std::net::SocketAddr;

use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Startup failures of the runtime adapters.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("database url is not configured; set `database.url` or pass --database-url")]
    MissingDatabaseUrl,
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] MigrateError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}
