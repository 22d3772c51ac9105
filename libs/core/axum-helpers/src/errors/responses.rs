//! Reusable OpenAPI response types for envelope-shaped errors.

#[allow(unused_imports)]
use serde_json::json;
use serde::Serialize;
use utoipa::{ToResponse, ToSchema};

/// Envelope as returned by error paths (documentation only)
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Mirrors the HTTP status
    pub code: u16,
    /// Human-readable error message
    pub message: String,
    /// `null`, or route-specific details
    #[schema(value_type = Option<Object>)]
    pub body: Option<serde_json::Value>,
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 500,
        "message": "Internal Server Error",
        "body": null
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "code": 400,
        "message": "Failed to update product",
        "body": null
    })
)]
pub struct BadRequestResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Not Found",
    content_type = "application/json",
    example = json!({
        "code": 404,
        "message": "Product not found",
        "body": null
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);
