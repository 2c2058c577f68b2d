//! Tracing setup for the tracker binary.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Builds the default filter from the configured level, scoped to this
/// workspace's crates so dependency noise stays at `warn`.
fn default_filter(level: &str) -> String {
    format!("warn,engine={level},client={level},domain={level}")
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set. The `json` format
/// is for log shippers; anything else gets the human-readable form used
/// during development.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
