//! HTTP API module for health and treasury endpoints.

pub mod handlers;
pub mod response;
pub mod routes;

pub use handlers::{AppState, HealthResponse};
pub use response::JsonResponse;
pub use routes::create_router;
