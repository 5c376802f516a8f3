//! Unit tests for the OTP service

use std::sync::Arc;

use crate::domain::entities::otp::{otp_cache_key, OtpPurpose, OTP_LENGTH};
use crate::errors::{AuthError, DomainError};
use crate::services::otp::{
    CacheServiceTrait, MockCacheService, MockEmailService, OtpService, OtpServiceConfig,
};

fn service() -> (
    OtpService<MockCacheService, MockEmailService>,
    MockCacheService,
    MockEmailService,
) {
    let cache = MockCacheService::new();
    let email = MockEmailService::new();
    let service = OtpService::new(
        Arc::new(cache.clone()),
        Arc::new(email.clone()),
        OtpServiceConfig::default(),
    );
    (service, cache, email)
}

#[tokio::test]
async fn test_issue_stores_and_sends() {
    let (service, cache, email) = service();

    service
        .issue("Jane@Example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    let sent = email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jane@example.com");
    assert_eq!(sent[0].purpose, OtpPurpose::Registration);
    assert_eq!(sent[0].code.len(), OTP_LENGTH);

    let stored = cache.peek("otp:jane@example.com").unwrap();
    let json: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(json["email"], "jane@example.com");
    assert_eq!(json["code"], sent[0].code.as_str());
}

#[tokio::test]
async fn test_reissue_replaces_code() {
    let (service, _cache, email) = service();

    service.issue("a@example.com", OtpPurpose::Registration).await.unwrap();
    let first = email.last_code_for("a@example.com").unwrap();
    service.issue("a@example.com", OtpPurpose::Registration).await.unwrap();
    let second = email.last_code_for("a@example.com").unwrap();

    assert!(service.check("a@example.com", &second).await.unwrap());
    if first != second {
        assert!(!service.check("a@example.com", &first).await.unwrap());
    }
}

#[tokio::test]
async fn test_verify_correct_code_does_not_consume() {
    let (service, _cache, email) = service();
    service.issue("a@example.com", OtpPurpose::Registration).await.unwrap();
    let code = email.last_code_for("a@example.com").unwrap();

    service.verify("a@example.com", &code).await.unwrap();
    service.verify("A@example.com", &code).await.unwrap();
    assert!(service.check("a@example.com", &code).await.unwrap());
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let (service, _cache, email) = service();
    service.issue("a@example.com", OtpPurpose::Registration).await.unwrap();
    let code = email.last_code_for("a@example.com").unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let err = service.verify("a@example.com", wrong).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpIncorrect)));
    assert!(!service.check("a@example.com", wrong).await.unwrap());
}

#[tokio::test]
async fn test_verify_without_code_is_expired() {
    let (service, _cache, _email) = service();
    let err = service.verify("nobody@example.com", "123456").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpExpired)));
}

#[tokio::test]
async fn test_expired_code() {
    let (service, cache, email) = service();
    service.issue("a@example.com", OtpPurpose::PasswordReset).await.unwrap();
    let code = email.last_code_for("a@example.com").unwrap();

    cache.expire(&otp_cache_key("a@example.com"));

    let err = service.verify("a@example.com", &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpExpired)));
}

#[tokio::test]
async fn test_invalidate() {
    let (service, cache, email) = service();
    service.issue("a@example.com", OtpPurpose::Registration).await.unwrap();
    let code = email.last_code_for("a@example.com").unwrap();

    service.invalidate("a@example.com").await.unwrap();

    assert!(!cache.exists("otp:a@example.com").await.unwrap());
    let err = service.check("a@example.com", &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpExpired)));
}

#[tokio::test]
async fn test_check_without_code_is_expired() {
    let (service, _cache, _email) = service();
    let err = service.check("nobody@example.com", "123456").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::OtpExpired)));
}

#[tokio::test]
async fn test_cache_failure_is_internal() {
    let (service, cache, email) = service();
    cache.set_failing(true);

    let err = service
        .issue("a@example.com", OtpPurpose::Registration)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert!(email.sent().is_empty());
}

#[tokio::test]
async fn test_email_failure_is_internal() {
    let (service, _cache, email) = service();
    email.set_failing(true);

    let err = service
        .issue("a@example.com", OtpPurpose::Registration)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}

#[tokio::test]
async fn test_mock_cache_keys_skip_expired() {
    let cache = MockCacheService::new();
    cache.set_with_ttl("otp:a", "1", 60).await.unwrap();
    cache.set("otp:b", "2").await.unwrap();
    cache.set("other", "3").await.unwrap();
    cache.expire("otp:a");

    assert_eq!(cache.keys("otp:*").await.unwrap(), vec!["otp:b".to_string()]);
}
