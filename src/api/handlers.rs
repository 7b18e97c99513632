//! HTTP API handlers.

use std::fmt;
use std::sync::Arc;

use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::OffsetDateTime;

use super::response::JsonResponse;
use crate::config::Config;
use crate::treasury::{
    FxRate, HedgeRecommendations, MockTreasuryData, TreasuryDataSource, TreasuryPosition,
};

/// Application state shared with handlers.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Arc<Config>,
    /// Source of treasury records.
    pub data: Arc<dyn TreasuryDataSource>,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state backed by the mock data source.
    pub fn new(config: Config) -> Self {
        Self::with_source(config, MockTreasuryData::new())
    }

    /// Create app state backed by a specific data source.
    pub fn with_source(config: Config, data: impl TreasuryDataSource) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(data),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle; enables `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    fn health_response(&self) -> HealthResponse {
        HealthResponse {
            status: "ok",
            service: self.config.service_name.clone(),
            environment: self.config.environment.clone(),
            time: OffsetDateTime::now_utc(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("data", &self.data)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// Health and readiness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Configured service name.
    pub service: String,
    /// Configured environment label.
    pub environment: String,
    /// Server time when the response was built.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> JsonResponse<HealthResponse> {
    JsonResponse::ok(state.health_response())
}

/// Readiness handler - same shape as health; there is nothing to wait for.
pub async fn ready(State(state): State<AppState>) -> JsonResponse<HealthResponse> {
    JsonResponse::ok(state.health_response())
}

/// Current positions per book.
pub async fn positions(State(state): State<AppState>) -> JsonResponse<Vec<TreasuryPosition>> {
    JsonResponse::ok(state.data.positions(OffsetDateTime::now_utc()))
}

/// Spot FX rates. All entries carry the same timestamp.
pub async fn rates(State(state): State<AppState>) -> JsonResponse<Vec<FxRate>> {
    JsonResponse::ok(state.data.rates(OffsetDateTime::now_utc()))
}

/// Hedge recommendations wrapped with their generation time.
pub async fn hedge_recommendations(
    State(state): State<AppState>,
) -> JsonResponse<HedgeRecommendations> {
    JsonResponse::ok(HedgeRecommendations {
        as_of: OffsetDateTime::now_utc(),
        recommendations: state.data.hedge_recommendations(),
    })
}

/// Prometheus text exposition.
pub async fn metrics(handle: PrometheusHandle) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}
