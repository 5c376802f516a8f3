//! Domain entities representing core business objects.

pub mod otp;
pub mod template;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use otp::{otp_cache_key, Otp, OtpPurpose, OTP_LENGTH};
pub use template::{Template, TemplateFilter, TemplateOrder, TEMPLATE_NAME_MAX_LEN};
pub use token::{Claims, TokenKind, TokenPair};
pub use user::{normalize_email, User, UserLookup, UserProfile, UserUpdate};
