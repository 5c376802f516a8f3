//! Account lifecycle: email check, registration, login, token refresh,
//! password reset and profile management.

mod config;
mod service;
mod types;


pub use config::UserServiceConfig;
pub use service::UserService;
pub use types::{AuthenticatedUser, CheckOutcome, PasswordReset, Registration};
