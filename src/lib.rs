//! Observe: conditional Datadog tracing and metrics export.
//!
//! Reads the process environment, decides whether telemetry export is on,
//! and if so builds a Datadog exporter and registers it with the global
//! tracing and stats registries.
//!
//! # Usage
//!
//! ```no_run
//! use observe_datadog::options::on_error;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), observe_datadog::ObserveError> {
//! observe_datadog::register_and_observe(on_error(|err| {
//!     eprintln!("telemetry export failed: {err}");
//! }))?;
//! # Ok(())
//! # }
//! ```
//!
//! Environment variables:
//! - `OBSERVE_SKIP`: skip observability entirely
//! - `DATADOG_ENABLED`: enable the Datadog exporter
//! - `DATADOG_ADDR`: agent address for traces and stats
//! - `SERVICE_NAME`, `SERVICE_VERSION`, `PROJECT_ID`: service identity
//!
//! # Modules
//!
//! - [`bootstrap`]: enablement check, construction and registration
//! - [`config`]: environment snapshot and service identity
//! - [`exporter`]: exporter capabilities and the Datadog exporter
//! - [`observability`]: logging setup and span bridge
//! - [`options`]: exporter options
//! - [`registry`]: registration targets

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // exporter::DatadogExporter is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc       // Error docs can be verbose
)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod exporter;
pub mod observability;
pub mod options;
pub mod registry;

pub use bootstrap::{new_datadog_exporter, register_and_observe, ExporterBootstrap};
pub use config::{EnvPlatform, Environment, ObserveConfig, ServiceInfo};
pub use error::ObserveError;
pub use exporter::{DatadogExporter, DatadogExporterFactory, ExporterFactory, StatsSink, TraceSink};
pub use options::{build_export_options, ErrorCallback, ExportOptions, TagValue};
pub use registry::{GlobalRegistry, StatsRegistry, TraceRegistry};
