//! Registration targets for exporters.
//!
//! The bootstrap registers a live exporter with a tracing registry and a
//! stats registry. Neither registration reports failure back to the caller.

use opentelemetry::global;

use crate::exporter::{StatsSink, TraceSink};

/// Process-wide collector of trace exporters.
pub trait TraceRegistry {
    fn register_exporter(&self, exporter: &dyn TraceSink);
}

/// Process-wide collector of stats exporters.
pub trait StatsRegistry {
    fn register_exporter(&self, exporter: &dyn StatsSink);
}

/// Registers exporters with the OpenTelemetry global providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRegistry;

impl TraceRegistry for GlobalRegistry {
    fn register_exporter(&self, exporter: &dyn TraceSink) {
        let _ = global::set_tracer_provider(exporter.tracer_provider());
        tracing::debug!("Registered global tracer provider");
    }
}

impl StatsRegistry for GlobalRegistry {
    fn register_exporter(&self, exporter: &dyn StatsSink) {
        global::set_meter_provider(exporter.meter_provider());
        tracing::debug!("Registered global meter provider");
    }
}
