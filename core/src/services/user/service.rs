//! Main user service implementation

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use tmpl_shared::types::{Page, Pagination};
use tmpl_shared::validation::{is_email, is_valid_user_name};

use crate::domain::entities::otp::OtpPurpose;
use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{normalize_email, User, UserLookup, UserProfile, UserUpdate};
use crate::domain::value_objects::validate_password;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{Column, RecordRepository, Table, UserRepository};
use crate::services::deadline::with_deadline;
use crate::services::otp::{CacheServiceTrait, EmailServiceTrait, OtpService};
use crate::services::token::TokenService;

use super::config::UserServiceConfig;
use super::types::{AuthenticatedUser, CheckOutcome, PasswordReset, Registration};

/// Service orchestrating the user flows over the store, the OTP cache and
/// the token issuer
pub struct UserService<U, R, C, E>
where
    U: UserRepository,
    R: RecordRepository,
    C: CacheServiceTrait,
    E: EmailServiceTrait,
{
    users: Arc<U>,
    records: Arc<R>,
    otp: Arc<OtpService<C, E>>,
    tokens: Arc<TokenService>,
    config: UserServiceConfig,
}

impl<U, R, C, E> UserService<U, R, C, E>
where
    U: UserRepository,
    R: RecordRepository,
    C: CacheServiceTrait,
    E: EmailServiceTrait,
{
    pub fn new(
        users: Arc<U>,
        records: Arc<R>,
        otp: Arc<OtpService<C, E>>,
        tokens: Arc<TokenService>,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            users,
            records,
            otp,
            tokens,
            config,
        }
    }

    /// Decide between login and registration for `email`
    ///
    /// Unknown addresses get a registration code. No user row is created
    /// here, so repeating the call only replaces the cached code.
    pub async fn check(&self, email: &str) -> DomainResult<CheckOutcome> {
        let email = require_email(email)?;
        with_deadline(self.config.request_timeout, async {
            if self
                .records
                .check_if_exists(Table::Users, Column::Email, &email)
                .await?
            {
                return Ok(CheckOutcome::Login);
            }
            self.otp.issue(&email, OtpPurpose::Registration).await?;
            Ok(CheckOutcome::Register)
        })
        .await
    }

    /// Whether `code` is the live code for `email`; never consumes it
    ///
    /// A missing or expired code is `Err(AuthError::OtpExpired)`, not `false`.
    pub async fn is_otp_right(&self, email: &str, code: &str) -> DomainResult<bool> {
        let email = require_email(email)?;
        with_deadline(self.config.request_timeout, self.otp.check(&email, code)).await
    }

    /// Create an account after verifying the emailed code
    ///
    /// # Returns
    /// * `Err(AuthError::OtpExpired)` - No code is cached for the email
    /// * `Err(AuthError::OtpIncorrect)` - The code does not match; no row is written
    /// * `Err(AuthError::EmailTaken)` - The email already has an account
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthenticatedUser> {
        let email = require_email(&registration.email)?;
        let user_name = require_user_name(&registration.user_name)?;
        validate_password(&registration.password)?;

        with_deadline(self.config.request_timeout, async {
            self.otp.verify(&email, &registration.otp).await?;

            if self
                .records
                .check_if_exists(Table::Users, Column::Email, &email)
                .await?
            {
                return Err(AuthError::EmailTaken.into());
            }
            if self
                .records
                .check_if_exists(Table::Users, Column::UserName, &user_name)
                .await?
            {
                return Err(DomainError::conflict("user_name already taken"));
            }

            let hashed = self.hash_password(registration.password.clone()).await?;
            let user = User::new(user_name.as_str(), email.as_str(), hashed);
            let tokens = self.tokens.generate_token_pair(&user.id, user.role)?;
            let user = self
                .users
                .create(user.with_refresh_token(tokens.refresh_token.clone()))
                .await?;

            self.discard_otp(&email).await;

            tracing::info!(user_id = %user.id, event = "user_registered", "Registered new user");
            Ok(AuthenticatedUser {
                user: user.profile(),
                tokens,
            })
        })
        .await
    }

    /// Password login by user name or email; rotates the stored refresh token
    pub async fn login(
        &self,
        user_name_or_email: &str,
        password: &str,
    ) -> DomainResult<AuthenticatedUser> {
        let lookup = UserLookup::by_user_name_or_email(user_name_or_email);

        with_deadline(self.config.request_timeout, async {
            let user = self.find_user(&lookup).await?;

            if !self.verify_password(password, &user.hashed_password).await? {
                tracing::warn!(user_id = %user.id, event = "login_failed", "Wrong password");
                return Err(AuthError::WrongPassword.into());
            }

            let tokens = self.issue_tokens(&user).await?;
            tracing::info!(user_id = %user.id, event = "user_logged_in", "User logged in");
            Ok(AuthenticatedUser {
                user: user.profile(),
                tokens,
            })
        })
        .await
    }

    /// Exchange a refresh token for a new pair
    ///
    /// Only the most recently issued refresh token of a user is accepted; the
    /// presented one is replaced, so every refresh token works once.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        with_deadline(self.config.request_timeout, async {
            let user = match self.users.get(&UserLookup::Id(claims.sub.clone())).await {
                Ok(user) => user,
                Err(DomainError::NotFound { .. }) => {
                    return Err(TokenError::RefreshTokenRevoked.into())
                }
                Err(e) => return Err(e),
            };

            if user.refresh_token.is_empty()
                || !constant_time_eq(user.refresh_token.as_bytes(), refresh_token.as_bytes())
            {
                tracing::warn!(user_id = %user.id, event = "refresh_token_revoked", "Stale refresh token presented");
                return Err(TokenError::RefreshTokenRevoked.into());
            }

            self.issue_tokens(&user).await
        })
        .await
    }

    /// Email a password reset code to the account's address
    pub async fn forgot_password(&self, user_name_or_email: &str) -> DomainResult<()> {
        let lookup = UserLookup::by_user_name_or_email(user_name_or_email);
        with_deadline(self.config.request_timeout, async {
            let user = self.find_user(&lookup).await?;
            self.otp.issue(&user.email, OtpPurpose::PasswordReset).await
        })
        .await
    }

    /// Set a new password after verifying the emailed code
    ///
    /// The stored refresh token is cleared, signing out every session.
    pub async fn reset_password(&self, reset: PasswordReset) -> DomainResult<()> {
        validate_password(&reset.new_password)?;
        let lookup = UserLookup::by_user_name_or_email(&reset.user_name_or_email);

        with_deadline(self.config.request_timeout, async {
            let user = self.find_user(&lookup).await?;
            self.otp.verify(&user.email, &reset.otp).await?;

            let hashed = self.hash_password(reset.new_password.clone()).await?;
            self.users.reset_password(&user.id, &hashed).await?;
            self.discard_otp(&user.email).await;

            tracing::info!(user_id = %user.id, event = "password_reset", "Password updated");
            Ok(())
        })
        .await
    }

    pub async fn profile(&self, user_id: &str) -> DomainResult<UserProfile> {
        with_deadline(self.config.request_timeout, async {
            let user = self.find_user(&UserLookup::Id(user_id.to_string())).await?;
            Ok(user.profile())
        })
        .await
    }

    /// Rename the account; a taken user name is a conflict
    pub async fn update_profile(&self, user_id: &str, user_name: &str) -> DomainResult<UserProfile> {
        let user_name = require_user_name(user_name)?;
        with_deadline(self.config.request_timeout, async {
            let update = UserUpdate {
                id: user_id.to_string(),
                user_name: Some(user_name),
            };
            match self.users.update(update).await {
                Ok(user) => Ok(user.profile()),
                Err(DomainError::NotFound { .. }) => Err(AuthError::UserNotFound.into()),
                Err(e) => Err(e),
            }
        })
        .await
    }

    pub async fn delete_account(&self, user_id: &str) -> DomainResult<()> {
        with_deadline(self.config.request_timeout, async {
            match self.users.delete(user_id).await {
                Ok(()) => {
                    tracing::info!(user_id = %user_id, event = "user_deleted", "Deleted account");
                    Ok(())
                }
                Err(DomainError::NotFound { .. }) => Err(AuthError::UserNotFound.into()),
                Err(e) => Err(e),
            }
        })
        .await
    }

    pub async fn list_users(&self, pagination: Pagination) -> DomainResult<Page<UserProfile>> {
        with_deadline(self.config.request_timeout, async {
            let page = self.users.find(pagination).await?;
            Ok(page.map(UserProfile::from))
        })
        .await
    }

    async fn find_user(&self, lookup: &UserLookup) -> DomainResult<User> {
        match self.users.get(lookup).await {
            Ok(user) => Ok(user),
            Err(DomainError::NotFound { .. }) => Err(AuthError::UserNotFound.into()),
            Err(e) => Err(e),
        }
    }

    /// Drop a used code once the store write has landed
    ///
    /// The write already succeeded, so a cache failure here is only logged;
    /// the code still expires with its TTL.
    async fn discard_otp(&self, email: &str) {
        if let Err(e) = self.otp.invalidate(email).await {
            tracing::warn!(
                email = %email,
                error = %e,
                event = "otp_clear_failed",
                "Failed to clear used otp"
            );
        }
    }

    /// New pair for `user`, with the refresh token written back to its row
    async fn issue_tokens(&self, user: &User) -> DomainResult<TokenPair> {
        let tokens = self.tokens.generate_token_pair(&user.id, user.role)?;
        self.records
            .update_single_field(
                Table::Users,
                Column::RefreshToken,
                &user.id,
                &tokens.refresh_token,
            )
            .await?;
        Ok(tokens)
    }

    async fn hash_password(&self, plain: String) -> DomainResult<String> {
        let hasher = self.config.password_hasher;
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, plain: &str, hashed: &str) -> DomainResult<bool> {
        let hasher = self.config.password_hasher;
        let (plain, hashed) = (plain.to_string(), hashed.to_string());
        tokio::task::spawn_blocking(move || hasher.verify(&plain, &hashed))
            .await
            .map_err(|e| DomainError::internal(format!("password check task failed: {}", e)))?
    }
}

fn require_email(email: &str) -> DomainResult<String> {
    let email = normalize_email(email);
    if !is_email(&email) {
        return Err(DomainError::validation("invalid email address"));
    }
    Ok(email)
}

fn require_user_name(user_name: &str) -> DomainResult<String> {
    let user_name = user_name.trim();
    if !is_valid_user_name(user_name) {
        return Err(DomainError::validation(
            "user_name must be 3-32 letters, digits, '_', '.' or '-'",
        ));
    }
    Ok(user_name.to_string())
}
