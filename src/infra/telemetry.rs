//! Process-wide logging and metric descriptions.

use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing::{Subscriber, debug, level_filters::LevelFilter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    METRIC_DESCRIPTIONS.call_once(describe_metrics);

    tracing_subscriber::registry()
        .with(env_filter(logging.level))
        .with(ErrorLayer::default())
        .with(output_layer(logging.format))
        .try_init()
        .map_err(|err| InfraError::Telemetry(err.to_string()))?;

    debug!(
        target = "brochure::telemetry",
        level = %logging.level,
        format = ?logging.format,
        "logging initialised"
    );
    Ok(())
}

/// `RUST_LOG` directives take precedence over the configured level.
fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

fn output_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    }
}

fn describe_metrics() {
    describe_counter!(
        "brochure_section_decode_degraded_total",
        Unit::Count,
        "Stored section payloads that failed to decode and were read as empty."
    );
    describe_counter!(
        "brochure_category_bucket_created_total",
        Unit::Count,
        "Month bucket categories created on first publish."
    );
}
