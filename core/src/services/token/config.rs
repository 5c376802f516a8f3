//! Configuration for the token service

use jsonwebtoken::Algorithm;

use tmpl_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in minutes
    pub refresh_token_expiry_minutes: i64,
    /// Audience written into tokens and required on verification
    pub audience: Vec<String>,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        TokenServiceConfig::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            algorithm: Algorithm::HS256,
            access_token_expiry_minutes: jwt.access_token_expiry_minutes,
            refresh_token_expiry_minutes: jwt.refresh_token_expiry_minutes,
            audience: jwt.audience.clone(),
        }
    }
}
