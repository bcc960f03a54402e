//! Logging setup utilities for staffwatch.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the server library crate and the binary log at `default_log_level`
/// unless `RUST_LOG` overrides it.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "staffwatch_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use staffwatch_shared::logger::setup_logger;
///
/// setup_logger("staffwatch_server", "info");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "staffwatch_server={level},staffwatch_shared={level},{bin}={level},tower_http={level}",
                    level = default_log_level,
                    bin = binary_name.replace('-', "_"),
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
