//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

use super::{env_or, env_string};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC secret used to sign tokens
    pub secret: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in minutes
    pub refresh_token_expiry_minutes: i64,

    /// Audience written into every token and required on verification
    pub audience: Vec<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            access_token_expiry_minutes: 300,
            refresh_token_expiry_minutes: 7 * 24 * 60,
            audience: vec!["template-front".to_string()],
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let audience = std::env::var("TOKEN_AUDIENCE")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.audience);

        Self {
            secret: env_string("SIGN_IN_KEY", DEFAULT_SECRET),
            access_token_expiry_minutes: env_or(
                "ACCESS_TOKEN_TIMEOUT",
                defaults.access_token_expiry_minutes,
            ),
            refresh_token_expiry_minutes: env_or(
                "REFRESH_TOKEN_TIMEOUT",
                defaults.refresh_token_expiry_minutes,
            ),
            audience,
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in minutes
    pub fn with_refresh_expiry_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_expiry_minutes = minutes;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// One-time password configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Lifetime of an issued code in seconds
    pub timeout_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 300 }
    }
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self {
            timeout_seconds: env_or("OTP_TIMEOUT", 300),
        }
    }
}

/// Authentication and authorization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub otp: OtpConfig,

    /// Path of the casbin-style policy file
    pub policy_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            otp: OtpConfig::default(),
            policy_path: String::from("./config/policy.csv"),
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            policy_path: env_string("AUTH_CONFIG_PATH", "./config/policy.csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert!(config.is_using_default_secret());
        assert_eq!(config.access_token_expiry_minutes, 300);
        assert_eq!(config.audience, vec!["template-front".to_string()]);
    }

    #[test]
    fn test_jwt_builders() {
        let config = JwtConfig::new("s3cret")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_minutes(60);
        assert!(!config.is_using_default_secret());
        assert_eq!(config.access_token_expiry_minutes, 5);
        assert_eq!(config.refresh_token_expiry_minutes, 60);
    }
}
