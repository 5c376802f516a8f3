//! Main token service implementation

use chrono::Duration;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::domain::value_objects::Role;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Service for issuing and verifying JWTs
///
/// Stateless: the only data it holds are the keys and validation rules built
/// from its configuration, so one instance is shared by every worker.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_audience(&config.audience);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a new token pair (access + refresh tokens) for a user
    ///
    /// # Arguments
    ///
    /// * `subject` - The user's id
    /// * `role` - The role written into both tokens
    pub fn generate_token_pair(&self, subject: &str, role: Role) -> Result<TokenPair, TokenError> {
        let access_lifetime = Duration::minutes(self.config.access_token_expiry_minutes);
        let refresh_lifetime = Duration::minutes(self.config.refresh_token_expiry_minutes);

        let access = Claims::new(
            subject,
            role,
            self.config.audience.clone(),
            TokenKind::Access,
            access_lifetime,
        );
        let refresh = Claims::new(
            subject,
            role,
            self.config.audience.clone(),
            TokenKind::Refresh,
            refresh_lifetime,
        );

        Ok(TokenPair {
            access_token: self.encode_jwt(&access)?,
            refresh_token: self.encode_jwt(&refresh)?,
            access_expires_in: access_lifetime.num_seconds(),
            refresh_expires_in: refresh_lifetime.num_seconds(),
        })
    }

    /// Verifies an access token
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The token's claims
    /// * `Err(TokenError::TokenExpired)` - Signature valid but past `exp`
    /// * `Err(_)` - Any other failure
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenKind::Access)
    }

    /// Verifies a refresh token; expiry is reported as `RefreshTokenExpired`
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token, TokenKind::Refresh).map_err(|e| match e {
            TokenError::TokenExpired => TokenError::RefreshTokenExpired,
            other => other,
        })
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAudience
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::Json(_) => TokenError::InvalidClaims,
                _ => TokenError::InvalidTokenFormat,
            })?;

        if claims.kind != expected {
            return Err(TokenError::WrongTokenKind {
                expected: expected.as_str(),
            });
        }
        Ok(claims)
    }

    /// Signs arbitrary claims with the service key
    pub fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.config.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, event = "token_encode_failed", "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }
}
