//! User account handlers
//!
//! - Email check and OTP check
//! - Registration, login and token refresh
//! - Password reset by emailed code
//! - Own profile read, rename and deletion, plus the admin user list

pub mod check;
pub mod password;
pub mod profile;
pub mod session;

pub use check::{check, check_otp};
pub use password::{forgot_password, reset_password};
pub use profile::{delete_account, list_users, profile, update_profile};
pub use session::{login, refresh, register};
