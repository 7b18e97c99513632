//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    health, hedge_recommendations, metrics, positions, rates, ready, AppState,
};
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Treasury endpoints
        .route("/api/v1/treasury/positions", get(positions))
        .route("/api/v1/treasury/rates", get(rates))
        .route(
            "/api/v1/treasury/hedge/recommendations",
            get(hedge_recommendations),
        );

    if let Some(handle) = state.metrics.clone() {
        router = router.route("/metrics", get(move || metrics(handle)));
    }

    router
        .route_layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
