//! One-time password workflow over email
//!
//! Codes are generated here, stored in the cache under `otp:<email>` with a
//! TTL, and delivered through an email adapter. Verification reads the cached
//! value and compares it in constant time.

mod config;
mod service;
mod traits;

#[cfg(any(test, feature = "mocks"))]
mod mocks;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::{CacheServiceTrait, EmailServiceTrait};

#[cfg(any(test, feature = "mocks"))]
pub use mocks::{MockCacheService, MockEmailService, SentEmail};
