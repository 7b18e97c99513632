//! JSON response contract shared by every endpoint.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

/// JSON body with an explicit status code.
///
/// Always sets `Content-Type: application/json` and the status. If the value
/// fails to serialize the status still goes out, with an empty body.
#[derive(Debug, Clone)]
pub struct JsonResponse<T> {
    status: StatusCode,
    value: T,
}

impl<T: Serialize> JsonResponse<T> {
    /// Respond with `status`.
    pub fn new(status: StatusCode, value: T) -> Self {
        Self { status, value }
    }

    /// Respond with 200 OK.
    pub fn ok(value: T) -> Self {
        Self::new(StatusCode::OK, value)
    }
}

impl<T: Serialize> IntoResponse for JsonResponse<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self.value) {
            Ok(bytes) => Body::from(bytes),
            Err(e) => {
                warn!(error = %e, status = %self.status, "failed to serialize response body");
                Body::empty()
            }
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        response
    }
}
