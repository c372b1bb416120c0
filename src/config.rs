//! Environment configuration for the exporter bootstrap.
//!
//! Supports:
//! - Environment variables via clap's `env` integration
//! - Sensible defaults when nothing is set (export disabled)
//! - A trait seam so gates and service identity can be faked in tests

use clap::builder::BoolishValueParser;
use clap::Parser;

use crate::error::ObserveError;

/// Identity of the running service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Project or environment identifier. Not used for export.
    pub project: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Process-wide signals consulted by the bootstrap.
///
/// Implementations must be side-effect free.
pub trait Environment {
    /// Skip observability entirely.
    fn skip_observe(&self) -> bool;

    /// Whether the Datadog exporter should run in this process.
    fn is_export_enabled(&self) -> bool;

    /// Service identity to attach to exported telemetry.
    fn service_info(&self) -> ServiceInfo;

    /// `host:port` of the Datadog agent, or empty for the exporter default.
    fn datadog_addr(&self) -> String;
}

/// Snapshot of the observability environment.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "observe")]
pub struct ObserveConfig {
    /// Datadog agent address used for both traces and stats
    #[arg(long, env = "DATADOG_ADDR")]
    pub datadog_addr: Option<String>,

    /// Skip observability setup entirely
    #[arg(long, env = "OBSERVE_SKIP", value_parser = BoolishValueParser::new())]
    pub skip_observe: bool,

    /// Enable the Datadog exporter
    #[arg(long, env = "DATADOG_ENABLED", value_parser = BoolishValueParser::new())]
    pub datadog_enabled: bool,

    /// Project or environment identifier
    #[arg(long, env = "PROJECT_ID")]
    pub project_id: Option<String>,

    /// Service name reported to Datadog
    #[arg(long, env = "SERVICE_NAME")]
    pub service_name: Option<String>,

    /// Service version reported to Datadog
    #[arg(long, env = "SERVICE_VERSION")]
    pub service_version: Option<String>,
}

impl ObserveConfig {
    /// Read the configuration from the process environment only.
    ///
    /// Command-line arguments are ignored so this is safe to call from
    /// inside any binary.
    pub fn from_env() -> Result<Self, ObserveError> {
        Ok(Self::try_parse_from(["observe"])?)
    }

    /// Create an enabled configuration for testing.
    #[cfg(test)]
    pub fn test_config(service: &str, version: &str) -> Self {
        Self {
            datadog_enabled: true,
            service_name: Some(service.into()),
            service_version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// The skip gate on its own, so it can be honoured before the rest of the
/// environment is validated.
#[derive(Parser, Debug)]
#[command(name = "observe")]
struct SkipGate {
    #[arg(long, env = "OBSERVE_SKIP", value_parser = BoolishValueParser::new())]
    skip_observe: bool,
}

/// Whether `OBSERVE_SKIP` is set, ignoring every other variable.
///
/// A malformed `OBSERVE_SKIP` counts as not skipping; the full snapshot
/// reports it.
pub fn skip_observe_from_env() -> bool {
    SkipGate::try_parse_from(["observe"])
        .map(|gate| gate.skip_observe)
        .unwrap_or(false)
}

/// [`Environment`] backed by an [`ObserveConfig`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct EnvPlatform {
    config: ObserveConfig,
}

impl EnvPlatform {
    pub fn new(config: ObserveConfig) -> Self {
        Self { config }
    }

    /// Snapshot the current process environment.
    pub fn from_env() -> Result<Self, ObserveError> {
        ObserveConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &ObserveConfig {
        &self.config
    }
}

impl Environment for EnvPlatform {
    fn skip_observe(&self) -> bool {
        self.config.skip_observe
    }

    fn is_export_enabled(&self) -> bool {
        self.config.datadog_enabled
    }

    fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            project: self.config.project_id.clone().unwrap_or_default(),
            service: self.config.service_name.clone().unwrap_or_default(),
            version: self.config.service_version.clone().unwrap_or_default(),
        }
    }

    fn datadog_addr(&self) -> String {
        self.config.datadog_addr.clone().unwrap_or_default()
    }
}
