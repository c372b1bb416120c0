//! Export options handed to the exporter constructor.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use opentelemetry::{KeyValue, Value};

use crate::config::Environment;

/// Namespace prepended to metric keys.
pub const NAMESPACE: &str = "opencensus";

/// Callback invoked by the exporter when an asynchronous export fails.
///
/// Cloning shares the same closure. The bootstrap never calls it itself.
pub type ErrorCallback = Arc<dyn Fn(&(dyn Error + 'static)) + Send + Sync>;

/// Wrap a closure as an [`ErrorCallback`].
pub fn on_error<F>(f: F) -> ErrorCallback
where
    F: Fn(&(dyn Error + 'static)) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An [`ErrorCallback`] that does nothing.
pub fn ignore_errors() -> ErrorCallback {
    Arc::new(|_| {})
}

/// Scalar value of a global tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Str(String),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<TagValue> for Value {
    fn from(value: TagValue) -> Self {
        match value {
            TagValue::Str(s) => Value::from(s),
            TagValue::I64(i) => Value::I64(i),
            TagValue::F64(f) => Value::F64(f),
            TagValue::Bool(b) => Value::Bool(b),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::I64(i) => write!(f, "{i}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Options for a Datadog exporter.
#[derive(Clone)]
pub struct ExportOptions {
    /// Namespace to which metric keys are appended.
    pub namespace: String,
    /// Service name used for tracing.
    pub service: String,
    /// Service version.
    pub version: String,
    /// `host[:port]` of the trace agent. Empty means the exporter default.
    pub trace_addr: String,
    /// `host[:port]` of the stats agent. Empty means the exporter default.
    pub stats_addr: String,
    /// Invoked on asynchronous export errors.
    pub on_error: ErrorCallback,
    /// Tags applied to every exported span and metric.
    pub global_tags: BTreeMap<String, TagValue>,
}

impl ExportOptions {
    /// Global tags as OpenTelemetry attributes.
    pub fn tag_attributes(&self) -> Vec<KeyValue> {
        self.global_tags
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), Value::from(v.clone())))
            .collect()
    }
}

impl fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOptions")
            .field("namespace", &self.namespace)
            .field("service", &self.service)
            .field("version", &self.version)
            .field("trace_addr", &self.trace_addr)
            .field("stats_addr", &self.stats_addr)
            .field("global_tags", &self.global_tags)
            .finish_non_exhaustive()
    }
}

/// Build exporter options, or `None` when export is disabled.
///
/// The address is used verbatim for both traces and stats; defaulting an
/// empty address is left to the exporter.
pub fn build_export_options<E>(
    env: &E,
    service: &str,
    version: &str,
    address: &str,
    on_error: ErrorCallback,
) -> Option<ExportOptions>
where
    E: Environment + ?Sized,
{
    if !env.is_export_enabled() {
        return None;
    }

    let global_tags = BTreeMap::from([
        ("service".to_string(), TagValue::from(service)),
        ("version".to_string(), TagValue::from(version)),
    ]);

    Some(ExportOptions {
        namespace: NAMESPACE.to_string(),
        service: service.to_string(),
        version: version.to_string(),
        trace_addr: address.to_string(),
        stats_addr: address.to_string(),
        on_error,
        global_tags,
    })
}
