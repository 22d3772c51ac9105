//! Catalog API routes

use axum::Router;
use domain_catalog::{MongoProductRepository, ProductService, handlers};

use crate::state::AppState;

/// Create the catalog router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    handlers::router(service)
}

/// Initialize catalog indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
