//! Tracing subscriber setup.
//!
//! Configures structured logging with:
//! - Environment-based filter (via `RUST_LOG`)
//! - Optional OpenTelemetry layer so `tracing` spans reach the exporter

use opentelemetry::trace::TracerProvider as _;
use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::exporter::TraceSink;

const DEFAULT_FILTER: &str = "info,observe_datadog=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn fmt_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
}

/// Initialize console logging for the given service.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing(service_name: &str) {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer())
        .init();

    tracing::info!(service = service_name, "Tracing initialized");
}

/// Initialize console logging and forward spans to `exporter`.
///
/// Call after the exporter has been built; spans recorded through
/// `tracing` are then exported alongside the ones created through the
/// OpenTelemetry API.
///
/// # Panics
///
/// Panics if a global subscriber has already been installed.
pub fn init_tracing_with_exporter(service_name: &str, exporter: &dyn TraceSink) {
    let tracer = exporter.tracer_provider().tracer(service_name.to_string());
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer())
        .with(otel_layer)
        .init();

    tracing::info!(service = service_name, "Tracing initialized with span export");
}

/// Initialize tracing for tests (only logs errors).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("error")
        .with_test_writer()
        .try_init();
}
