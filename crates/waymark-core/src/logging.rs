//! Logging integration for the waymark routing layer.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-request
//! routing spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info",
/// "warn", "error"). In debug mode a pretty, human-readable format is used;
/// in production a structured JSON format is used.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one routing operation.
///
/// Attach this span around a resolve or build call so that all rewrite
/// events emitted during the operation include the request ID.
///
/// # Examples
///
/// ```
/// use waymark_core::logging::routing_span;
///
/// let span = routing_span("abc-123");
/// let _guard = span.enter();
/// tracing::info!("resolving request URL");
/// ```
pub fn routing_span(request_id: &str) -> tracing::Span {
    tracing::info_span!("routing", id = request_id)
}
