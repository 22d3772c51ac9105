//! Uniform `{code, message, body}` response wrapper.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope wrapping every payload, successful or not.
///
/// `code` usually mirrors the HTTP status but is not required to: product
/// creation answers `201 Created` with `code: 200`.
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 404,
///   "message": "Product not found",
///   "body": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Application-level status code
    pub code: u16,
    /// Human-readable outcome
    pub message: String,
    /// Payload; `null` on most errors
    pub body: T,
}

/// Wrap `body` in an envelope.
pub fn format<T>(code: u16, message: impl Into<String>, body: T) -> Envelope<T> {
    Envelope {
        code,
        message: message.into(),
        body,
    }
}

/// Build a response whose HTTP status and envelope code are both `status`.
pub fn respond<T: Serialize>(status: StatusCode, message: impl Into<String>, body: T) -> Response {
    (status, Json(format(status.as_u16(), message, body))).into_response()
}
