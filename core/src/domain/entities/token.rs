//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::Role;

/// Distinguishes access tokens from refresh tokens sharing one signing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub role: Role,

    pub aud: Vec<String>,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,

    /// JWT ID
    pub jti: String,

    pub kind: TokenKind,
}

impl Claims {
    /// Creates claims valid for `lifetime` from now
    pub fn new(
        sub: impl Into<String>,
        role: Role,
        aud: Vec<String>,
        kind: TokenKind,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            role,
            aud,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Access and refresh token issued together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub access_expires_in: i64,
    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry() {
        let aud = vec!["template-front".to_string()];
        let live = Claims::new("id", Role::User, aud.clone(), TokenKind::Access, Duration::minutes(5));
        assert!(!live.is_expired());
        assert_eq!(live.exp - live.iat, 300);

        let dead = Claims::new("id", Role::User, aud, TokenKind::Access, Duration::seconds(-1));
        assert!(dead.is_expired());
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new(
            "id",
            Role::Admin,
            vec!["template-front".to_string()],
            TokenKind::Refresh,
            Duration::minutes(1),
        );
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["kind"], "refresh");
        assert_eq!(json["aud"][0], "template-front");
    }
}
