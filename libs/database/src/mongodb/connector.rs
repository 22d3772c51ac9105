use mongodb::{Client, Database, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::{DEFAULT_DATABASE, MongoConfig};

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Connect using a MongoConfig
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config, database};
///
/// let config = MongoConfig::new("mongodb://localhost:27017/catalog");
/// let client = connect_from_config(&config).await?;
/// let db = database(&client, &config);
/// ```
///
/// The connection is verified with a `ping` before returning, so an
/// unreachable server fails here rather than on the first request.
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    super::health::ping(&client)
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// Resolve the database to use: the configured name, then the one in the
/// connection string, then [`DEFAULT_DATABASE`]
pub fn database(client: &Client, config: &MongoConfig) -> Database {
    match config.database {
        Some(ref name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    }
}
