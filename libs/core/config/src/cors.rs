use crate::{ConfigError, FromEnv};
use http::HeaderValue;

/// Environment variables that may each carry one allowed origin
pub const ORIGIN_VARS: [&str; 3] = [
    "LOCALHOST_ORIGIN_URL",
    "WEBSITE_ORIGIN_URL",
    "TEST_WEBSITE_ORIGIN_URL",
];

/// Allowed browser origins for cross-origin requests
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl CorsConfig {
    pub fn new(allowed_origins: Vec<HeaderValue>) -> Self {
        Self { allowed_origins }
    }

    /// True when no origin was configured and the server should stay permissive
    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

impl FromEnv for CorsConfig {
    /// Collects up to three origins; unset or blank variables are skipped
    fn from_env() -> Result<Self, ConfigError> {
        let mut allowed_origins = Vec::with_capacity(ORIGIN_VARS.len());

        for key in ORIGIN_VARS {
            let Ok(raw) = std::env::var(key) else {
                continue;
            };
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let origin = raw.parse::<HeaderValue>().map_err(|e| ConfigError::ParseError {
                key: key.to_string(),
                details: e.to_string(),
            })?;
            allowed_origins.push(origin);
        }

        Ok(Self { allowed_origins })
    }
}
