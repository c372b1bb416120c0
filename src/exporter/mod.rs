//! Exporter capabilities and construction.
//!
//! Provides:
//! - [`TraceSink`] and [`StatsSink`], the two halves every exporter offers
//! - [`ExporterFactory`], the seam the bootstrap constructs exporters through
//! - [`datadog`], the OpenTelemetry-backed Datadog exporter

pub mod datadog;

use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::TracerProvider;

use crate::options::ExportOptions;

pub use datadog::{DatadogExporter, DatadogExporterError, DatadogExporterFactory};

/// Exporter side that receives finished spans.
pub trait TraceSink: Send + Sync {
    /// Tracer provider whose spans flow into this exporter.
    fn tracer_provider(&self) -> TracerProvider;
}

/// Exporter side that receives recorded measurements.
pub trait StatsSink: Send + Sync {
    /// Meter provider whose measurements flow into this exporter.
    fn meter_provider(&self) -> SdkMeterProvider;
}

/// Anything that can sink both spans and stats.
pub trait Exporter: TraceSink + StatsSink {}

impl<T> Exporter for T where T: TraceSink + StatsSink {}

/// Builds an exporter from options.
pub trait ExporterFactory {
    type Exporter: Exporter;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct a live exporter.
    fn new_exporter(&self, options: ExportOptions) -> Result<Self::Exporter, Self::Error>;
}
