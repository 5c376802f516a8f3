//! Value objects carried by entities and tokens.

pub mod password;
pub mod role;

pub use password::{validate_password, PasswordHasher, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use role::Role;
