//! API configuration

use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Secret for signing access tokens
    pub jwt_access_secret: String,
    /// Access token validity in seconds
    pub jwt_access_expiration_secs: u64,
    /// Secret for signing refresh tokens
    pub jwt_refresh_secret: String,
    /// Refresh token validity in seconds
    pub jwt_refresh_expiration_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: "postgres://localhost/insurance".to_string(),
            jwt_access_secret: "change-me-in-production".to_string(),
            jwt_access_expiration_secs: 3600,
            jwt_refresh_secret: "change-me-too-in-production".to_string(),
            jwt_refresh_expiration_secs: 7 * 24 * 3600,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
