//! # Axum Helpers
//!
//! Shared plumbing for the catalog's Axum services.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{code, message, body}` wrapper every response uses
//! - **[`extractors`]**: [`LenientJson`], a body extractor that defaults absent payloads
//! - **[`errors`]**: [`ApiError`] plus the fallback and panic responders
//! - **[`middleware`]**: CORS layers built from [`core_config::cors::CorsConfig`]
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, &CorsConfig::default());
//!     let cleanup = async { tracing::info!("Closing connections") };
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), cleanup)
//!         .await
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

// Re-export envelope types
pub use envelope::{Envelope, format, respond};

// Re-export server types
pub use server::{
    HealthResponse, ShutdownCoordinator, create_production_app, create_router, health_router,
};

// Re-export CORS helpers
pub use middleware::{create_cors_layer, create_permissive_cors_layer};

// Re-export error types
pub use errors::ApiError;

// Re-export extractors
pub use extractors::LenientJson;
