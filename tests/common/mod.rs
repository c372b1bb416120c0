//! Test doubles for the exporter bootstrap.
//!
//! Provides:
//! - A fixed [`Environment`]
//! - A factory that records every construction and can be told to fail
//! - An exporter that keeps finished spans in memory
//! - A registry that counts registrations

#![allow(dead_code)]

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use observe_datadog::{
    Environment, ExportOptions, ExporterFactory, ServiceInfo, StatsRegistry, StatsSink,
    TraceRegistry, TraceSink,
};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::testing::trace::InMemorySpanExporter;
use opentelemetry_sdk::trace::TracerProvider;

/// Environment with fixed answers.
#[derive(Debug, Clone, Default)]
pub struct FakeEnv {
    pub skip: bool,
    pub enabled: bool,
    pub info: ServiceInfo,
    pub addr: String,
}

impl FakeEnv {
    /// Enabled environment for the given service.
    pub fn enabled(service: &str, version: &str) -> Self {
        Self {
            enabled: true,
            info: ServiceInfo {
                project: "test-project".into(),
                service: service.into(),
                version: version.into(),
            },
            ..Self::default()
        }
    }

    pub fn with_addr(mut self, addr: &str) -> Self {
        self.addr = addr.into();
        self
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }
}

impl Environment for FakeEnv {
    fn skip_observe(&self) -> bool {
        self.skip
    }

    fn is_export_enabled(&self) -> bool {
        self.enabled
    }

    fn service_info(&self) -> ServiceInfo {
        self.info.clone()
    }

    fn datadog_addr(&self) -> String {
        self.addr.clone()
    }
}

/// Exporter backed by in-memory providers.
pub struct FakeExporter {
    pub options: ExportOptions,
    spans: InMemorySpanExporter,
    tracer_provider: TracerProvider,
    meter_provider: SdkMeterProvider,
}

impl FakeExporter {
    fn new(options: ExportOptions) -> Self {
        let spans = InMemorySpanExporter::default();
        Self {
            options,
            tracer_provider: TracerProvider::builder()
                .with_simple_exporter(spans.clone())
                .build(),
            meter_provider: SdkMeterProvider::builder().build(),
            spans,
        }
    }

    /// Names of the spans exported so far.
    pub fn finished_span_names(&self) -> Vec<String> {
        self.spans
            .get_finished_spans()
            .expect("in-memory exporter never fails")
            .into_iter()
            .map(|span| span.name.to_string())
            .collect()
    }
}

impl fmt::Debug for FakeExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeExporter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl TraceSink for FakeExporter {
    fn tracer_provider(&self) -> TracerProvider {
        self.tracer_provider.clone()
    }
}

impl StatsSink for FakeExporter {
    fn meter_provider(&self) -> SdkMeterProvider {
        self.meter_provider.clone()
    }
}

/// Construction failure reported by [`RecordingFactory`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("fake exporter failed: {0}")]
pub struct FakeError(pub String);

/// Factory that records the options it was called with.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    fail_with: Option<FakeError>,
    seen: Arc<Mutex<Vec<ExportOptions>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(FakeError(message.into())),
            ..Self::default()
        }
    }

    /// Number of construction attempts.
    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Options passed to the most recent construction attempt.
    pub fn last_options(&self) -> Option<ExportOptions> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl ExporterFactory for RecordingFactory {
    type Exporter = FakeExporter;
    type Error = FakeError;

    fn new_exporter(&self, options: ExportOptions) -> Result<FakeExporter, FakeError> {
        self.seen.lock().unwrap().push(options.clone());

        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        Ok(FakeExporter::new(options))
    }
}

/// Registry that only counts registrations.
#[derive(Debug, Clone, Default)]
pub struct CountingRegistry {
    traces: Arc<AtomicUsize>,
    stats: Arc<AtomicUsize>,
}

impl CountingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace_registrations(&self) -> usize {
        self.traces.load(Ordering::SeqCst)
    }

    pub fn stats_registrations(&self) -> usize {
        self.stats.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.trace_registrations() + self.stats_registrations()
    }
}

impl TraceRegistry for CountingRegistry {
    fn register_exporter(&self, _exporter: &dyn TraceSink) {
        self.traces.fetch_add(1, Ordering::SeqCst);
    }
}

impl StatsRegistry for CountingRegistry {
    fn register_exporter(&self, _exporter: &dyn StatsSink) {
        self.stats.fetch_add(1, Ordering::SeqCst);
    }
}
