//! Conditional exporter construction and registration.
//!
//! Two outcomes only:
//! - disabled: nothing constructed, nothing registered, `Ok`
//! - enabled: exporter constructed, then registered for traces and stats
//!
//! Construction failure is the single error path.

use crate::config::{skip_observe_from_env, EnvPlatform, Environment};
use crate::error::ObserveError;
use crate::exporter::{DatadogExporter, DatadogExporterFactory, ExporterFactory};
use crate::options::{build_export_options, ErrorCallback};
use crate::registry::{GlobalRegistry, StatsRegistry, TraceRegistry};

/// Wires an exporter into the tracing and stats registries when enabled.
#[derive(Debug, Clone)]
pub struct ExporterBootstrap<E, F, T = GlobalRegistry, S = GlobalRegistry> {
    env: E,
    factory: F,
    traces: T,
    stats: S,
}

impl ExporterBootstrap<EnvPlatform, DatadogExporterFactory> {
    /// Bootstrap over the process environment and the global registries.
    pub fn from_env() -> Result<Self, ObserveError> {
        Ok(Self::new(
            EnvPlatform::from_env()?,
            DatadogExporterFactory,
            GlobalRegistry,
            GlobalRegistry,
        ))
    }
}

impl<E, F, T, S> ExporterBootstrap<E, F, T, S>
where
    E: Environment,
    F: ExporterFactory,
    T: TraceRegistry,
    S: StatsRegistry,
{
    pub fn new(env: E, factory: F, traces: T, stats: S) -> Self {
        Self {
            env,
            factory,
            traces,
            stats,
        }
    }

    /// Construct and register the exporter if observability is on.
    ///
    /// The registry calls return nothing, so a registration that silently
    /// fails still yields `Ok(())`.
    pub fn register_and_observe(&self, on_error: ErrorCallback) -> Result<(), ObserveError> {
        if self.env.skip_observe() {
            tracing::debug!("Observability skipped");
            return Ok(());
        }

        let Some(exporter) = self
            .new_exporter(on_error)
            .map_err(ObserveError::initialization)?
        else {
            return Ok(());
        };

        TraceRegistry::register_exporter(&self.traces, &exporter);
        StatsRegistry::register_exporter(&self.stats, &exporter);

        tracing::info!("Tracing and stats exporter registered");
        Ok(())
    }

    /// Construct the exporter, or `Ok(None)` when export is disabled.
    ///
    /// Factory errors are returned unwrapped. The exporter is not
    /// registered; the caller owns it and should flush it on shutdown.
    pub fn new_exporter(&self, on_error: ErrorCallback) -> Result<Option<F::Exporter>, F::Error> {
        let info = self.env.service_info();
        let addr = self.env.datadog_addr();

        let Some(options) =
            build_export_options(&self.env, &info.service, &info.version, &addr, on_error)
        else {
            tracing::debug!(service = %info.service, "Datadog export disabled");
            return Ok(None);
        };

        self.factory.new_exporter(options).map(Some)
    }
}

/// Register the Datadog exporter if the environment enables it.
///
/// Reads the environment once per call. See [`crate::config::ObserveConfig`]
/// for the variables consulted. `OBSERVE_SKIP` is checked first, so a
/// skipped process never fails on the rest of its configuration.
pub fn register_and_observe(on_error: ErrorCallback) -> Result<(), ObserveError> {
    if skip_observe_from_env() {
        tracing::debug!("Observability skipped");
        return Ok(());
    }

    ExporterBootstrap::from_env()?.register_and_observe(on_error)
}

/// Build, but do not register, the Datadog exporter.
///
/// Returns `Ok(None)` when export is disabled. The caller should register
/// the exporter and call [`DatadogExporter::shutdown`] on termination.
pub fn new_datadog_exporter(
    on_error: ErrorCallback,
) -> Result<Option<DatadogExporter>, ObserveError> {
    ExporterBootstrap::from_env()?
        .new_exporter(on_error)
        .map_err(ObserveError::initialization)
}
