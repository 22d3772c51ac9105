use axum::http::{HeaderValue, Method, header};
use core_config::cors::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer restricted to `allowed_origins`.
///
/// # Returns
/// A configured `CorsLayer` with:
/// - The given allowed origins
/// - Methods GET, POST, PUT, DELETE
/// - Headers Content-Type, Authorization
/// - Credentials allowed
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Creates a permissive CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Restricted layer when origins are configured, permissive otherwise.
pub fn cors_layer_from_config(config: &CorsConfig) -> CorsLayer {
    if config.is_permissive() {
        tracing::warn!("No CORS origins configured, allowing any origin");
        create_permissive_cors_layer()
    } else {
        tracing::info!(origins = ?config.allowed_origins, "CORS configured");
        create_cors_layer(config.allowed_origins.clone())
    }
}
