//! Authentication and token error types

use thiserror::Error;

/// Account and OTP failures raised by the user flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("otp expired")]
    OtpExpired,

    #[error("otp incorrect")]
    OtpIncorrect,

    #[error("incorrect password")]
    WrongPassword,

    #[error("user not found")]
    UserNotFound,

    #[error("email already registered")]
    EmailTaken,
}

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Expected a {expected} token")]
    WrongTokenKind { expected: &'static str },

    #[error("Refresh token has been revoked")]
    RefreshTokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether the token was well-formed and signed but past its expiry
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired | TokenError::RefreshTokenExpired)
    }
}
