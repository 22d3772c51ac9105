use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::any::Any;

use crate::envelope;

/// Message returned by the catch-all responder
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    envelope::respond(StatusCode::NOT_FOUND, "Not Found", Value::Null)
}

/// Catch-all responder for handlers that panic.
///
/// Plug into `tower_http::catch_panic::CatchPanicLayer::custom`. Always
/// answers `500 {code: 500, message: "Internal Server Error", body: {}}`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = details, "Unhandled error");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(envelope::format(500, INTERNAL_SERVER_ERROR, json!({}))),
    )
        .into_response()
}
