//! User entity and lookup types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tmpl_shared::validation::is_email;

use crate::domain::value_objects::Role;

/// Registered account
///
/// `hashed_password` and `refresh_token` never leave the service layer;
/// handlers only ever see [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// UUID v4 rendered as a string
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub hashed_password: String,
    /// Most recently issued refresh token, empty when none is valid
    pub refresh_token: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh id and the default role
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        hashed_password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user_name.into(),
            email: normalize_email(&email.into()),
            hashed_password: hashed_password.into(),
            refresh_token: String::new(),
            role: Role::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Public view of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// User fields safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        UserProfile::from(&user)
    }
}

/// Which unique column a user is fetched by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(String),
    Email(String),
    UserName(String),
}

impl UserLookup {
    /// Resolves a `user_name_or_email` input: anything shaped like an email
    /// addresses the email column, everything else the user name column.
    pub fn by_user_name_or_email(value: &str) -> Self {
        let value = value.trim();
        if is_email(value) {
            UserLookup::Email(normalize_email(value))
        } else {
            UserLookup::UserName(value.to_string())
        }
    }

    /// Bound value of the lookup
    pub fn value(&self) -> &str {
        match self {
            UserLookup::Id(v) | UserLookup::Email(v) | UserLookup::UserName(v) => v,
        }
    }

    /// Whether `user` satisfies this lookup
    pub fn matches(&self, user: &User) -> bool {
        match self {
            UserLookup::Id(id) => &user.id == id,
            UserLookup::Email(email) => user.email == normalize_email(email),
            UserLookup::UserName(name) => &user.user_name == name,
        }
    }
}

/// Partial replacement of mutable profile fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    pub id: String,
    pub user_name: Option<String>,
}

/// Emails are compared and stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("jane", " Jane@Example.com ", "hash");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, Role::User);
        assert!(user.refresh_token.is_empty());
        assert_eq!(user.created_at, user.updated_at);
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = User::new("a_user", "a@example.com", "hash");
        let b = User::new("b_user", "b@example.com", "hash");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_profile_hides_secrets() {
        let user = User::new("jane", "jane@example.com", "hash").with_refresh_token("rt");
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["user_name"], "jane");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_lookup_by_user_name_or_email() {
        assert_eq!(
            UserLookup::by_user_name_or_email("Jane@Example.com"),
            UserLookup::Email("jane@example.com".to_string())
        );
        assert_eq!(
            UserLookup::by_user_name_or_email(" jane_doe "),
            UserLookup::UserName("jane_doe".to_string())
        );
    }

    #[test]
    fn test_lookup_matches() {
        let user = User::new("jane", "jane@example.com", "hash");
        assert!(UserLookup::Id(user.id.clone()).matches(&user));
        assert!(UserLookup::Email("JANE@example.com".to_string()).matches(&user));
        assert!(UserLookup::UserName("jane".to_string()).matches(&user));
        assert!(!UserLookup::UserName("john".to_string()).matches(&user));
    }
}
