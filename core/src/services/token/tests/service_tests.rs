//! Unit tests for token service

use chrono::Duration;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::domain::value_objects::Role;
use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::default())
}

fn expired_access_claims(service: &TokenService) -> Claims {
    Claims::new(
        "user-1",
        Role::User,
        service.config().audience.clone(),
        TokenKind::Access,
        Duration::minutes(-5),
    )
}

#[test]
fn test_generate_and_verify_pair() {
    let service = service();
    let pair = service.generate_token_pair("user-1", Role::User).unwrap();

    let access = service.verify_access_token(&pair.access_token).unwrap();
    assert_eq!(access.sub, "user-1");
    assert_eq!(access.role, Role::User);
    assert_eq!(access.aud, vec!["template-front".to_string()]);
    assert_eq!(access.kind, TokenKind::Access);
    assert_eq!(pair.access_expires_in, 300 * 60);

    let refresh = service.verify_refresh_token(&pair.refresh_token).unwrap();
    assert_eq!(refresh.kind, TokenKind::Refresh);
    assert_ne!(access.jti, refresh.jti);
}

#[test]
fn test_expired_token_is_distinguished() {
    let service = service();
    let token = service.encode_jwt(&expired_access_claims(&service)).unwrap();
    assert_eq!(
        service.verify_access_token(&token),
        Err(TokenError::TokenExpired)
    );
}

#[test]
fn test_expired_refresh_token() {
    let service = service();
    let claims = Claims::new(
        "user-1",
        Role::User,
        service.config().audience.clone(),
        TokenKind::Refresh,
        Duration::minutes(-5),
    );
    let token = service.encode_jwt(&claims).unwrap();
    let err = service.verify_refresh_token(&token).unwrap_err();
    assert_eq!(err, TokenError::RefreshTokenExpired);
    assert!(err.is_expired());
}

#[test]
fn test_bad_signature_is_not_expiry() {
    let issuer = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let pair = issuer.generate_token_pair("user-1", Role::User).unwrap();

    let err = service().verify_access_token(&pair.access_token).unwrap_err();
    assert_eq!(err, TokenError::InvalidSignature);
    assert!(!err.is_expired());
}

#[test]
fn test_expired_token_with_bad_signature_is_invalid() {
    let issuer = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });
    let token = issuer.encode_jwt(&expired_access_claims(&issuer)).unwrap();
    assert_eq!(
        service().verify_access_token(&token),
        Err(TokenError::InvalidSignature)
    );
}

#[test]
fn test_wrong_audience() {
    let issuer = TokenService::new(TokenServiceConfig {
        audience: vec!["someone-else".to_string()],
        ..TokenServiceConfig::default()
    });
    let pair = issuer.generate_token_pair("user-1", Role::User).unwrap();
    assert_eq!(
        service().verify_access_token(&pair.access_token),
        Err(TokenError::InvalidClaims)
    );
}

#[test]
fn test_garbage_token() {
    assert_eq!(
        service().verify_access_token("garbage"),
        Err(TokenError::InvalidTokenFormat)
    );
}

#[test]
fn test_token_kinds_are_not_interchangeable() {
    let service = service();
    let pair = service.generate_token_pair("user-1", Role::Admin).unwrap();
    assert_eq!(
        service.verify_access_token(&pair.refresh_token),
        Err(TokenError::WrongTokenKind { expected: "access" })
    );
    assert_eq!(
        service.verify_refresh_token(&pair.access_token),
        Err(TokenError::WrongTokenKind { expected: "refresh" })
    );
}
