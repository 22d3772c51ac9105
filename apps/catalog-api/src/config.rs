use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            cors,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "MONGODB_URI",
        "MONGODB_URL",
        "MONGO_URL",
        "PORT",
        "LOCALHOST_ORIGIN_URL",
        "WEBSITE_ORIGIN_URL",
        "TEST_WEBSITE_ORIGIN_URL",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter().map(|key| (*key, None)).collect()
    }

    #[test]
    fn test_requires_connection_string() {
        temp_env::with_vars(unset_all(), || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_defaults() {
        let mut vars = unset_all();
        vars.push(("MONGODB_URI", Some("mongodb://localhost:27017/catalog")));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "catalog_api");
            assert_eq!(config.server.port, 1711);
            assert!(config.cors.is_permissive());
        });
    }

    #[test]
    fn test_reads_origins_and_port() {
        let mut vars = unset_all();
        vars.push(("MONGO_URL", Some("mongodb://db:27017")));
        vars.push(("PORT", Some("8080")));
        vars.push(("WEBSITE_ORIGIN_URL", Some("https://shop.example.com")));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.mongodb.url, "mongodb://db:27017");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.cors.allowed_origins.len(), 1);
        });
    }

    #[test]
    fn test_rejects_bad_port() {
        let mut vars = unset_all();
        vars.push(("MONGODB_URI", Some("mongodb://localhost:27017")));
        vars.push(("PORT", Some("seventeen")));

        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
