//! Logging setup for the Deai binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive: every listed target at `default_log_level`.
///
/// Targets are crate names as they appear in `tracing` metadata, so `-` is
/// replaced by `_` (e.g. `deai-server` becomes `deai_server`).
pub fn default_directive(targets: &[&str], default_log_level: &str) -> String {
    targets
        .iter()
        .map(|target| format!("{}={}", target.replace('-', "_"), default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set; otherwise every target in
/// `targets` logs at `default_log_level` and everything else stays silent.
///
/// # Arguments
///
/// * `targets` - Crate or binary names to enable (e.g. `["deai-server", "tower_http"]`)
/// * `default_log_level` - The default log level (e.g. "debug", "info", "warn")
///
/// # Examples
///
/// ```ignore
/// use deai_shared::logger::setup_logger;
///
/// setup_logger(&["deai-server", env!("CARGO_BIN_NAME")], "info");
/// ```
pub fn setup_logger(targets: &[&str], default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(targets, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
