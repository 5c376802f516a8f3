//! Inputs and outputs of the user flows

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserProfile;

/// Result of checking an email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    /// An account exists; the client should show the login form
    Login,
    /// No account yet; a registration code has been emailed
    Register,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub otp: String,
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub user_name_or_email: String,
    pub otp: String,
    pub new_password: String,
}

/// Profile plus a freshly issued token pair
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user: UserProfile,
    pub tokens: TokenPair,
}
