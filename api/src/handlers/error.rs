//! Translation of domain errors into HTTP responses
//!
//! Every handler funnels its failures through [`domain_error_response`], so
//! the status code and envelope for a given error are decided in one place.

use actix_web::{error::InternalError, http::StatusCode, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use tmpl_core::errors::{AuthError, DomainError, TokenError};
use tmpl_shared::{status_codes, StandardResponse};

/// Message returned for any internal failure; details stay in the logs
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// HTTP status, envelope status and client-facing message for `err`
pub fn classify(err: &DomainError) -> (StatusCode, &'static str, String) {
    match err {
        DomainError::Validation { message } => {
            (StatusCode::BAD_REQUEST, status_codes::BAD_REQUEST, message.clone())
        }
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            status_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Conflict { message } => {
            (StatusCode::CONFLICT, status_codes::CONFLICT, message.clone())
        }
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            status_codes::UNAUTHORIZED,
            "Unauthorized".to_string(),
        ),
        DomainError::PermissionDenied => (
            StatusCode::FORBIDDEN,
            status_codes::PERMISSION_DENIED,
            "Permission denied".to_string(),
        ),
        DomainError::PayloadTooLarge { message } => (
            StatusCode::PAYLOAD_TOO_LARGE,
            status_codes::SIZE_EXCEEDED,
            message.clone(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            status_codes::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        ),
        DomainError::Auth(auth) => classify_auth(auth),
        DomainError::Token(token) => classify_token(token),
    }
}

fn classify_auth(err: &AuthError) -> (StatusCode, &'static str, String) {
    let message = err.to_string();
    match err {
        AuthError::OtpExpired | AuthError::OtpIncorrect => {
            (StatusCode::BAD_REQUEST, status_codes::BAD_REQUEST, message)
        }
        AuthError::WrongPassword => {
            (StatusCode::BAD_REQUEST, status_codes::WRONG_PASSWORD, message)
        }
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, status_codes::NOT_FOUND, message),
        AuthError::EmailTaken => (StatusCode::CONFLICT, status_codes::CONFLICT, message),
    }
}

fn classify_token(err: &TokenError) -> (StatusCode, &'static str, String) {
    match err {
        TokenError::TokenExpired => (
            StatusCode::UNAUTHORIZED,
            status_codes::ACCESS_TOKEN_EXPIRED,
            "Access token has expired".to_string(),
        ),
        TokenError::RefreshTokenExpired => (
            StatusCode::UNAUTHORIZED,
            status_codes::REFRESH_TOKEN_EXPIRED,
            "Refresh token has expired".to_string(),
        ),
        TokenError::TokenGenerationFailed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            status_codes::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE.to_string(),
        ),
        other => (
            StatusCode::UNAUTHORIZED,
            status_codes::UNAUTHORIZED,
            other.to_string(),
        ),
    }
}

/// Envelope response for `err`
pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    let (status, code, message) = classify(err);
    HttpResponse::build(status).json(StandardResponse::message(code, message))
}

/// Log `err` against the request and build its response
///
/// Server-side failures are logged at error level with their full message,
/// client mistakes at warn.
pub fn log_error_response(request_id: &str, action: &str, err: &DomainError) -> HttpResponse {
    let response = domain_error_response(err);
    if response.status().is_server_error() {
        log::error!("[{}] {} failed: {}", request_id, action, err);
    } else {
        log::warn!("[{}] {} rejected: {}", request_id, action, err);
    }
    response
}

/// 400 response naming every field that failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reason = errs
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_default();
            format!("{}: {}", field, reason)
        })
        .collect();
    fields.sort();

    HttpResponse::BadRequest().json(StandardResponse::message(
        status_codes::BAD_REQUEST,
        format!("invalid request: {}", fields.join("; ")),
    ))
}

/// Error handler for the JSON, query and path extractors
///
/// Malformed input gets the same 400 envelope as a failed validation instead
/// of actix-web's plain-text default.
pub fn extractor_error<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = HttpResponse::BadRequest().json(StandardResponse::message(
        status_codes::BAD_REQUEST,
        err.to_string(),
    ));
    InternalError::from_response(err, response).into()
}
