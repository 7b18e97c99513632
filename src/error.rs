//! Unified error types for the treasury service.

use thiserror::Error;

/// Unified error type for the treasury service.
///
/// Every variant is a startup or serving failure. Request handlers never
/// produce one.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Listen address could not be interpreted.
    #[error("invalid listen address {addr:?}: {reason}")]
    InvalidListenAddr {
        /// The configured address.
        addr: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Listener failed to bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: String,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
