//! Datadog exporter over OpenTelemetry OTLP.
//!
//! The Datadog Agent ingests OTLP/gRPC, so both halves are plain OTLP
//! pipelines:
//! - traces: batch span processor pointed at `trace_addr`
//! - stats: periodic metric reader pointed at `stats_addr`
//!
//! Global tags, service identity and namespace become resource attributes.

use std::time::Duration;

use opentelemetry::metrics::MetricsError;
use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::{Protocol, TonicExporterBuilder, WithExportConfig};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::{self as sdktrace, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use thiserror::Error;

use super::{ExporterFactory, StatsSink, TraceSink};
use crate::options::ExportOptions;

/// How often the metric reader pushes to the agent.
const STATS_PERIOD: Duration = Duration::from_secs(10);

/// Errors raised while building the OTLP pipelines.
#[derive(Debug, Error)]
pub enum DatadogExporterError {
    #[error("failed to build trace pipeline: {0}")]
    Trace(#[from] TraceError),

    #[error("failed to build metrics pipeline: {0}")]
    Metrics(#[from] MetricsError),
}

/// Tracing and stats exporter for a Datadog Agent.
///
/// Flushing at process shutdown is the owner's job; see [`Self::shutdown`].
#[derive(Debug)]
pub struct DatadogExporter {
    options: ExportOptions,
    tracer_provider: TracerProvider,
    meter_provider: SdkMeterProvider,
}

impl DatadogExporter {
    /// Build both pipelines from the given options.
    ///
    /// Must be called from inside a Tokio runtime. `options.on_error`
    /// becomes the process-wide OpenTelemetry error handler, so the most
    /// recently built exporter's callback receives every export error.
    pub fn new(options: ExportOptions) -> Result<Self, DatadogExporterError> {
        let resource = resource_for(&options);

        let tracer_provider = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(otlp_exporter(&options.trace_addr))
            .with_trace_config(sdktrace::Config::default().with_resource(resource.clone()))
            .install_batch(runtime::Tokio)?;

        let meter_provider = opentelemetry_otlp::new_pipeline()
            .metrics(runtime::Tokio)
            .with_exporter(otlp_exporter(&options.stats_addr))
            .with_resource(resource)
            .with_period(STATS_PERIOD)
            .build()?;

        let on_error = options.on_error.clone();
        if let Err(e) = global::set_error_handler(move |err| on_error(&err)) {
            tracing::warn!(error = %e, "Failed to install export error handler");
        }

        tracing::info!(
            service = %options.service,
            namespace = %options.namespace,
            trace_addr = %options.trace_addr,
            stats_addr = %options.stats_addr,
            "Datadog exporter configured"
        );

        Ok(Self {
            options,
            tracer_provider,
            meter_provider,
        })
    }

    /// Options this exporter was built from.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Tracer named after the service, for bridging `tracing` spans.
    pub fn tracer(&self) -> sdktrace::Tracer {
        self.tracer_provider.tracer(self.options.service.clone())
    }

    /// Push buffered spans and measurements to the agent.
    pub fn flush(&self) -> Result<(), DatadogExporterError> {
        for result in self.tracer_provider.force_flush() {
            result?;
        }
        self.meter_provider.force_flush()?;
        Ok(())
    }

    /// Stop the batch span processor and the periodic metric reader.
    ///
    /// Both providers export what they still buffer before stopping. Both
    /// are shut down even if the first fails; the first error is returned.
    /// A second call fails because the providers are already shut down.
    pub fn shutdown(&self) -> Result<(), DatadogExporterError> {
        let traces = self.tracer_provider.shutdown();
        let stats = self.meter_provider.shutdown();
        traces?;
        stats?;
        tracing::debug!(service = %self.options.service, "Datadog exporter shut down");
        Ok(())
    }
}

impl TraceSink for DatadogExporter {
    fn tracer_provider(&self) -> TracerProvider {
        self.tracer_provider.clone()
    }
}

impl StatsSink for DatadogExporter {
    fn meter_provider(&self) -> SdkMeterProvider {
        self.meter_provider.clone()
    }
}

/// Builds [`DatadogExporter`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatadogExporterFactory;

impl ExporterFactory for DatadogExporterFactory {
    type Exporter = DatadogExporter;
    type Error = DatadogExporterError;

    fn new_exporter(&self, options: ExportOptions) -> Result<DatadogExporter, DatadogExporterError> {
        DatadogExporter::new(options)
    }
}

/// OTLP endpoint URL for an agent address.
///
/// Empty means "let the exporter pick its default". A bare `host[:port]`
/// gets an `http://` scheme.
pub fn agent_endpoint(addr: &str) -> Option<String> {
    let addr = addr.trim();
    if addr.is_empty() {
        None
    } else if addr.contains("://") {
        Some(addr.to_string())
    } else {
        Some(format!("http://{addr}"))
    }
}

fn otlp_exporter(addr: &str) -> TonicExporterBuilder {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_protocol(Protocol::Grpc);

    match agent_endpoint(addr) {
        Some(endpoint) => exporter.with_endpoint(endpoint),
        None => exporter,
    }
}

fn resource_for(options: &ExportOptions) -> Resource {
    let mut attrs = vec![
        KeyValue::new("service.name", options.service.clone()),
        KeyValue::new("service.version", options.version.clone()),
        KeyValue::new("service.namespace", options.namespace.clone()),
    ];
    attrs.extend(options.tag_attributes());
    Resource::new(attrs)
}
