//! Service configuration loaded from environment variables.

use std::ffi::OsString;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// Service configuration loaded from environment variables.
///
/// Read once at startup and shared read-only with the router.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Identity ===
    /// Service name reported by the health endpoints.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Deployment environment label (local, dev, prod, ...).
    #[serde(default = "default_environment")]
    pub environment: String,

    // === Server Configuration ===
    /// Listen address in `host:port` form. An empty host means all interfaces.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Seconds a client has to send the full request head.
    #[serde(default = "default_read_header_timeout")]
    pub read_header_timeout_secs: u64,

    // === Observability ===
    /// Log filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_service_name() -> String {
    "treasury-service".to_string()
}

fn default_environment() -> String {
    "local".to_string()
}

fn default_listen_addr() -> String {
    ":8081".to_string()
}

fn default_read_header_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            environment: default_environment(),
            listen_addr: default_listen_addr(),
            read_header_timeout_secs: default_read_header_timeout(),
            rust_log: default_log_level(),
            log_json: false,
            metrics_enabled: default_true(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(utf8_vars(std::env::vars_os()))
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Variables set to the empty string count as unset.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars.into_iter().filter(|(_, value)| !value.is_empty());
        Ok(envy::from_iter(vars)?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "SERVICE_NAME must not be blank".to_string(),
            ));
        }

        if self.environment.trim().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "ENVIRONMENT must not be blank".to_string(),
            ));
        }

        if self.read_header_timeout_secs == 0 {
            return Err(ServiceError::InvalidConfig(
                "READ_HEADER_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        self.bind_addr().map(|_| ())
    }

    /// Address to hand to the TCP listener.
    ///
    /// `:8081` becomes `0.0.0.0:8081`, which is IPv4 only; `[::]` is not used
    /// because it fails to bind on hosts with IPv6 disabled. Set
    /// `LISTEN_ADDR=[::]:8081` for dual-stack. Hostnames are left for the
    /// resolver.
    pub fn bind_addr(&self) -> Result<String> {
        let addr = self.listen_addr.trim();
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| ServiceError::InvalidListenAddr {
                addr: addr.to_string(),
                reason: "missing port".to_string(),
            })?;

        port.parse::<u16>()
            .map_err(|e| ServiceError::InvalidListenAddr {
                addr: addr.to_string(),
                reason: format!("invalid port {port:?}: {e}"),
            })?;

        if host.is_empty() {
            Ok(format!("0.0.0.0:{port}"))
        } else {
            Ok(addr.to_string())
        }
    }

    /// Read-header timeout as a [`Duration`].
    pub fn read_header_timeout(&self) -> Duration {
        Duration::from_secs(self.read_header_timeout_secs)
    }
}

/// Keep only variables whose name and value are valid UTF-8.
///
/// Unrelated non-UTF-8 variables must not stop the service from starting.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}
