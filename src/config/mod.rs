//! Deployment settings.
//!
//! Sources are layered lowest to highest: `config/default.*`, `brochure.*`,
//! an explicit `--config-file`, `BROCHURE__SECTION__KEY` environment
//! variables, then command-line flags. Every key is optional; validation runs
//! once on the merged result.

mod cli;

pub use cli::{CliArgs, Command, DatabaseOverride, MigrateArgs, ServeArgs, ServeOverrides};

use std::{net::SocketAddr, num::NonZeroU32, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "brochure";
const ENV_PREFIX: &str = "BROCHURE";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 30;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    /// How long in-flight requests may drain after a shutdown signal.
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Required by `serve` and `migrate`; checked when the pool is opened.
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn invalid(key: &'static str, reason: impl Into<String>) -> LoadError {
    LoadError::Invalid {
        key,
        reason: reason.into(),
    }
}

/// Merges every source for `cli` and validates the result.
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));
    if let Some(path) = cli.config_file.as_deref() {
        builder = builder.add_source(File::from(path).required(true));
    }
    let merged = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let mut raw: RawSettings = merged.try_deserialize()?;
    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve(&args.overrides),
        Some(Command::Migrate(args)) => raw.apply_database(&args.database),
        None => {}
    }

    Settings::try_from(raw)
}

/// Parses the process arguments and loads settings for them.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    server: RawServer,
    logging: RawLogging,
    database: RawDatabase,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawLogging {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawDatabase {
    url: Option<String>,
    max_connections: Option<u32>,
}

/// Replaces `slot` only when the flag was given.
fn overlay<T: Clone>(slot: &mut Option<T>, flag: Option<&T>) {
    if let Some(value) = flag {
        *slot = Some(value.clone());
    }
}

impl RawSettings {
    fn apply_serve(&mut self, flags: &ServeOverrides) {
        overlay(&mut self.server.host, flags.server_host.as_ref());
        overlay(&mut self.server.port, flags.server_port.as_ref());
        overlay(
            &mut self.server.graceful_shutdown_seconds,
            flags.server_graceful_shutdown_seconds.as_ref(),
        );
        overlay(&mut self.logging.level, flags.log_level.as_ref());
        overlay(&mut self.logging.json, flags.log_json.as_ref());
        overlay(
            &mut self.database.max_connections,
            flags.database_max_connections.as_ref(),
        );
        self.apply_database(&flags.database);
    }

    fn apply_database(&mut self, flags: &DatabaseOverride) {
        overlay(&mut self.database.url, flags.database_url.as_ref());
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = LoadError;

    fn try_from(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            server: raw.server.try_into()?,
            logging: raw.logging.try_into()?,
            database: raw.database.try_into()?,
        })
    }
}

impl TryFrom<RawServer> for ServerSettings {
    type Error = LoadError;

    fn try_from(raw: RawServer) -> Result<Self, LoadError> {
        let host = raw.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = raw.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(invalid("server.port", "must be greater than zero"));
        }
        let addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|err| invalid("server.host", format!("`{host}:{port}`: {err}")))?;

        let grace = raw
            .graceful_shutdown_seconds
            .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
        if grace == 0 {
            return Err(invalid(
                "server.graceful_shutdown_seconds",
                "must be greater than zero",
            ));
        }

        Ok(Self {
            addr,
            graceful_shutdown: Duration::from_secs(grace),
        })
    }
}

impl TryFrom<RawLogging> for LoggingSettings {
    type Error = LoadError;

    fn try_from(raw: RawLogging) -> Result<Self, LoadError> {
        let level = match raw.level.as_deref() {
            Some(level) => LevelFilter::from_str(level)
                .map_err(|err| invalid("logging.level", err.to_string()))?,
            None => LevelFilter::INFO,
        };
        let format = if raw.json.unwrap_or(false) {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };

        Ok(Self { level, format })
    }
}

impl TryFrom<RawDatabase> for DatabaseSettings {
    type Error = LoadError;

    fn try_from(raw: RawDatabase) -> Result<Self, LoadError> {
        let url = raw
            .url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        let max_connections =
            NonZeroU32::new(raw.max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS))
                .ok_or_else(|| invalid("database.max_connections", "must be greater than zero"))?;

        Ok(Self {
            url,
            max_connections,
        })
    }
}
