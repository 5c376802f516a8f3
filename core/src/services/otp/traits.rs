//! Traits for cache and email service integration

use async_trait::async_trait;

use crate::domain::entities::otp::OtpPurpose;

/// Key/value cache with per-key expiry
#[async_trait]
pub trait CacheServiceTrait: Send + Sync {
    /// Store a value without expiry
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Store a value that disappears after `ttl_seconds`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String>;
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Remove a key; `true` when something was removed
    async fn delete(&self, key: &str) -> Result<bool, String>;
    async fn exists(&self, key: &str) -> Result<bool, String>;
    /// Keys matching a glob-style pattern such as `otp:*`
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, String>;
}

/// Outbound email delivery
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a one-time code to `to`
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<(), String>;
}
