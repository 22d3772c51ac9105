//! Document store connectivity for the catalog services
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction and health checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = mongodb::database(&client, &config);
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
