//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing, policy file and OTP lifetime
//! - `cache` - Redis connection
//! - `database` - Postgres connection and pool
//! - `email` - SMTP credentials and provider selection
//! - `environment` - environment detection and logging
//! - `server` - HTTP bind address, base URL, uploads and request timeout

pub mod auth;
pub mod cache;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, OtpConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::for_environment(environment),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            logging: LoggingConfig::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(environment),
        }
    }
}

/// Reads an environment variable and parses it, returning `default` when the
/// variable is absent or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a string environment variable with a default.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        std::env::set_var("TMPL_TEST_ENV_OR", "not-a-number");
        assert_eq!(env_or("TMPL_TEST_ENV_OR", 42u16), 42);
        std::env::set_var("TMPL_TEST_ENV_OR", " 7 ");
        assert_eq!(env_or("TMPL_TEST_ENV_OR", 42u16), 7);
        std::env::remove_var("TMPL_TEST_ENV_OR");
    }

    #[test]
    fn test_default_config_is_consistent() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.otp.timeout_seconds, 300);
        assert_eq!(config.email.provider, EmailProvider::Mock);
    }
}
