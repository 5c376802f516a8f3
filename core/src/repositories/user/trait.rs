//! User repository trait defining the interface for user persistence.
//!
//! Every method is a single statement against the store. Missing rows are
//! reported as `DomainError::NotFound`, unique-constraint violations as
//! `DomainError::Conflict`, and every other driver failure as
//! `DomainError::Internal`.

use async_trait::async_trait;

use tmpl_shared::types::{Page, Pagination};

use crate::domain::entities::user::{User, UserLookup, UserUpdate};
use crate::errors::DomainResult;

/// Repository trait for User entity persistence operations
///
/// # Example
/// ```no_run
/// # use tmpl_core::repositories::UserRepository;
/// # use tmpl_core::domain::entities::user::UserLookup;
/// # async fn example(repo: &impl UserRepository) -> Result<(), Box<dyn std::error::Error>> {
/// let user = repo.get(&UserLookup::Email("jane@example.com".into())).await?;
/// println!("found {}", user.user_name);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored row
    /// * `Err(DomainError::Conflict)` - Email or user name already taken
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Fetch a single user by id, email or user name
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user matches the lookup
    async fn get(&self, lookup: &UserLookup) -> DomainResult<User>;

    /// One page of users ordered by creation time, plus the total count
    async fn find(&self, pagination: Pagination) -> DomainResult<Page<User>>;

    /// Replace the provided fields, refresh `updated_at` and return the new row
    async fn update(&self, update: UserUpdate) -> DomainResult<User>;

    /// Store a new password hash and clear the refresh token in one write
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user has this id
    async fn reset_password(&self, id: &str, hashed_password: &str) -> DomainResult<()>;

    /// Remove a user permanently
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
