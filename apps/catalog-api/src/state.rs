//! Application state management.
//!
//! Built once in `main` and handed to the route builders; nothing here is
//! global.

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is inexpensive: the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client
    pub mongo_client: Client,
    /// Database holding the `products` collection
    pub db: Database,
}
