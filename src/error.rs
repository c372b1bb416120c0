//! Error types for exporter bootstrap.

use thiserror::Error;

/// Boxed error returned by an exporter factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`crate::register_and_observe`] and friends.
///
/// A disabled exporter is never an error; it shows up as `Ok(())` or
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum ObserveError {
    /// Exporter construction failed against an enabled configuration.
    #[error("unable to initiate tracing exporter: {source}")]
    Initialization {
        #[source]
        source: BoxError,
    },

    /// The environment could not be parsed into an [`crate::config::ObserveConfig`].
    #[error("invalid observability configuration: {0}")]
    Config(#[from] clap::Error),
}

impl ObserveError {
    pub fn initialization<E>(source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Initialization {
            source: source.into(),
        }
    }
}
