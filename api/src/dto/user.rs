use serde::{Deserialize, Serialize};
use validator::Validate;

use tmpl_core::services::{CheckOutcome, PasswordReset, Registration};
use tmpl_shared::{Pagination, PaginationError};

/// Query of `GET /v1/user/otp`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OtpCheckQuery {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub status: CheckOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpCheckResponse {
    pub is_right: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub user_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 72))]
    pub password: String,

    #[validate(length(min = 1))]
    pub otp: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
            otp: req.otp,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 255))]
    pub user_name_or_email: String,

    #[validate(length(min = 1, max = 72))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 255))]
    pub user_name_or_email: String,

    #[validate(length(min = 1))]
    pub otp: String,

    #[validate(length(min = 8, max = 72))]
    pub new_password: String,
}

impl From<ResetPasswordRequest> for PasswordReset {
    fn from(req: ResetPasswordRequest) -> Self {
        Self {
            user_name_or_email: req.user_name_or_email,
            otp: req.otp,
            new_password: req.new_password,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 3, max = 32))]
    pub user_name: String,
}

/// `page` and `limit` query parameters, validated by [`Pagination::new`]
///
/// Kept signed so that `page=0` or `limit=-1` reach validation and get a
/// 400 with a useful message instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn pagination(&self) -> Result<Pagination, PaginationError> {
        Pagination::new(self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
            otp: "123456".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            ..valid
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_pagination_query() {
        assert_eq!(
            PaginationQuery::default().pagination().unwrap(),
            Pagination::default()
        );
        let query = PaginationQuery {
            page: Some(0),
            limit: None,
        };
        assert!(query.pagination().is_err());
    }
}
