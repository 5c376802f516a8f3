//! Configuration for the OTP service

use tmpl_shared::config::OtpConfig;

#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Seconds a code stays valid in the cache
    pub ttl_seconds: u64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self { ttl_seconds: 300 }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl_seconds: config.timeout_seconds,
        }
    }
}
