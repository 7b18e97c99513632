//! Treasury/FX mock data service.
//!
//! Serves health checks plus static treasury positions, FX rates and hedge
//! recommendations as JSON over HTTP. The data is hardcoded behind the
//! [`treasury::TreasuryDataSource`] trait so a real feed can replace it later.
//!
//! # Endpoints
//!
//! ```text
//! GET /health                                  HealthResponse
//! GET /ready                                   HealthResponse
//! GET /api/v1/treasury/positions               [TreasuryPosition]
//! GET /api/v1/treasury/rates                   [FxRate]
//! GET /api/v1/treasury/hedge/recommendations   {as_of, recommendations}
//! GET /metrics                                 Prometheus text (when enabled)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`treasury`]: Treasury data types and the mock data source
//! - [`api`]: HTTP handlers, routes and the JSON response contract
//! - [`metrics`]: Prometheus request metrics
//! - [`server`]: Accept loop with read-header timeout
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod treasury;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
