//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("email regex is valid")
});

static USER_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.\-]{3,32}$").expect("user name regex is valid"));

/// Whether `value` looks like an email address
///
/// Used to decide whether a `user_name_or_email` field addresses the email or
/// the user name column.
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Whether `value` is an acceptable user name: 3-32 letters, digits, `_`, `.` or `-`
pub fn is_valid_user_name(value: &str) -> bool {
    USER_NAME_REGEX.is_match(value)
}

/// Whether `value` is exactly six ASCII digits
pub fn is_otp_code(value: &str) -> bool {
    value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit())
}
