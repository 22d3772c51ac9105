pub mod handlers;
pub mod responses;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::envelope;

/// Error rendered as an envelope: `{code: status, message, body}`.
///
/// The body is `null` unless a route attaches details with
/// [`ApiError::with_body`].
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub body: Value,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body: Value::Null,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Replace the `null` body with structured details
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status.as_u16();
        if self.status.is_server_error() {
            tracing::error!(status = code, "{}", self.message);
        } else if self.status == StatusCode::NOT_FOUND {
            tracing::info!(status = code, "{}", self.message);
        } else {
            tracing::warn!(status = code, "{}", self.message);
        }

        envelope::respond(self.status, self.message, self.body)
    }
}
