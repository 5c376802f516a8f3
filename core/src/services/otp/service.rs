//! OTP issue and verification

use std::sync::Arc;

use crate::domain::entities::otp::{otp_cache_key, Otp, OtpPurpose};
use crate::domain::entities::user::normalize_email;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::config::OtpServiceConfig;
use super::traits::{CacheServiceTrait, EmailServiceTrait};

/// Issues one-time codes and checks submitted ones
pub struct OtpService<C: CacheServiceTrait, E: EmailServiceTrait> {
    cache: Arc<C>,
    email: Arc<E>,
    config: OtpServiceConfig,
}

impl<C: CacheServiceTrait, E: EmailServiceTrait> OtpService<C, E> {
    pub fn new(cache: Arc<C>, email: Arc<E>, config: OtpServiceConfig) -> Self {
        Self {
            cache,
            email,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Generate a code, cache it for the configured TTL and email it
    ///
    /// A new code replaces any earlier one for the same address. If delivery
    /// fails the cached code is left in place; it simply expires.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> DomainResult<()> {
        let otp = Otp::generate(email);
        let payload = serde_json::to_string(&otp)
            .map_err(|e| DomainError::internal(format!("Failed to encode otp: {}", e)))?;

        self.cache
            .set_with_ttl(&otp.cache_key(), &payload, self.config.ttl_seconds)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %otp.email,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store otp in cache"
                );
                DomainError::internal(format!("Failed to store otp: {}", e))
            })?;

        self.email
            .send_otp(&otp.email, &otp.code, purpose)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %otp.email,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to send otp email"
                );
                DomainError::internal(format!("Failed to send otp: {}", e))
            })?;

        tracing::info!(
            email = %otp.email,
            purpose = ?purpose,
            event = "otp_issued",
            "Issued one-time code"
        );
        Ok(())
    }

    /// Non-consuming check: whether `code` matches the live code
    ///
    /// # Returns
    /// * `Err(AuthError::OtpExpired)` - No live code for the email
    pub async fn check(&self, email: &str, code: &str) -> DomainResult<bool> {
        match self.load(email).await? {
            Some(otp) => Ok(otp.matches(code)),
            None => Err(AuthError::OtpExpired.into()),
        }
    }

    /// Verify a submitted code without consuming it
    ///
    /// # Returns
    /// * `Err(AuthError::OtpExpired)` - No live code for the email
    /// * `Err(AuthError::OtpIncorrect)` - A code exists but does not match
    pub async fn verify(&self, email: &str, code: &str) -> DomainResult<()> {
        match self.load(email).await? {
            None => {
                tracing::debug!(email = %normalize_email(email), event = "otp_expired", "No live otp");
                Err(AuthError::OtpExpired.into())
            }
            Some(otp) if otp.matches(code) => Ok(()),
            Some(_) => {
                tracing::warn!(
                    email = %normalize_email(email),
                    event = "otp_incorrect",
                    "Submitted otp did not match"
                );
                Err(AuthError::OtpIncorrect.into())
            }
        }
    }

    /// Drop the code for `email` after it has been used
    pub async fn invalidate(&self, email: &str) -> DomainResult<()> {
        self.cache
            .delete(&otp_cache_key(email))
            .await
            .map(|_| ())
            .map_err(|e| DomainError::internal(format!("Failed to clear otp: {}", e)))
    }

    async fn load(&self, email: &str) -> DomainResult<Option<Otp>> {
        let raw = self
            .cache
            .get(&otp_cache_key(email))
            .await
            .map_err(|e| DomainError::internal(format!("Failed to read otp: {}", e)))?;

        match raw {
            None => Ok(None),
            Some(raw) => serde_json::from_str::<Otp>(&raw).map(Some).map_err(|e| {
                tracing::error!(error = %e, event = "otp_corrupt", "Cached otp is not valid JSON");
                DomainError::internal("Cached otp is corrupt")
            }),
        }
    }
}
