//! Error types for sentiment-server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request-level errors returned to API clients as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Twitter API errors. Search turns all of these into mock data.
#[derive(Debug, thiserror::Error)]
pub enum TwitterError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Twitter API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed Twitter response: {0}")]
    Malformed(String),
}
