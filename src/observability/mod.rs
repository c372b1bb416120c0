//! Structured logging for processes that bootstrap an exporter.
//!
//! Provides:
//! - Console logging filtered by `RUST_LOG`
//! - A `tracing` to OpenTelemetry bridge fed by a registered exporter

pub mod tracing;
