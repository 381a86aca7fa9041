//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber for binaries.
///
/// Library consumers install their own subscriber; this is only called from
/// the CLI entry point.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
