//! One-time password held in the cache while an email is being verified

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use super::user::normalize_email;

/// Number of digits in a code
pub const OTP_LENGTH: usize = 6;

const OTP_KEY_PREFIX: &str = "otp:";

/// Why a code was sent; selects the email wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

impl OtpPurpose {
    pub fn subject(&self) -> &'static str {
        match self {
            OtpPurpose::Registration => "Your verification code",
            OtpPurpose::PasswordReset => "Your password reset code",
        }
    }
}

/// Cached `{email, code}` pair, stored as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Otp {
    pub email: String,
    pub code: String,
}

impl Otp {
    /// Generates a zero-padded six digit code from the OS CSPRNG
    pub fn generate(email: &str) -> Self {
        let value: u32 = OsRng.gen_range(0..1_000_000);
        Self {
            email: normalize_email(email),
            code: format!("{:0width$}", value, width = OTP_LENGTH),
        }
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.trim().as_bytes())
    }

    pub fn cache_key(&self) -> String {
        otp_cache_key(&self.email)
    }
}

/// Cache key holding the code for `email`
pub fn otp_cache_key(email: &str) -> String {
    format!("{}{}", OTP_KEY_PREFIX, normalize_email(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        for _ in 0..100 {
            let otp = Otp::generate("a@example.com");
            assert_eq!(otp.code.len(), OTP_LENGTH);
            assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_matches() {
        let otp = Otp {
            email: "a@example.com".to_string(),
            code: "012345".to_string(),
        };
        assert!(otp.matches("012345"));
        assert!(otp.matches(" 012345 "));
        assert!(!otp.matches("12345"));
        assert!(!otp.matches("012346"));
    }

    #[test]
    fn test_cache_key_normalizes_email() {
        assert_eq!(otp_cache_key(" A@Example.com"), "otp:a@example.com");
        assert_eq!(Otp::generate("B@example.com").cache_key(), "otp:b@example.com");
    }

    #[test]
    fn test_json_shape() {
        let otp = Otp {
            email: "a@example.com".to_string(),
            code: "000001".to_string(),
        };
        let json = serde_json::to_value(&otp).unwrap();
        assert_eq!(json, serde_json::json!({"email": "a@example.com", "code": "000001"}));
    }
}
