//! Status codes carried in the `status` field of every response envelope

/// Machine-readable status strings shared by handlers and middleware
pub mod status_codes {
    pub const SUCCESS: &str = "success";
    pub const BAD_REQUEST: &str = "bad_request";
    pub const WRONG_PASSWORD: &str = "wrong_password";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const ACCESS_TOKEN_EXPIRED: &str = "access_token_expired";
    pub const REFRESH_TOKEN_EXPIRED: &str = "refresh_token_expired";
    pub const PERMISSION_DENIED: &str = "permission_denied";
    pub const NOT_FOUND: &str = "not_found";
    pub const CONFLICT: &str = "conflict";
    pub const SIZE_EXCEEDED: &str = "size_exceeded";
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}
