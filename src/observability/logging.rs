//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Honor the configured level, with `RUST_LOG` taking precedence
//! - Pretty output for terminals, JSON for machine parsing

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter used by [`init_logging`].
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("admin_console_client={},admin_console={}", config.log_level, config.log_level)
            .into()
    })
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = build_filter(config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
