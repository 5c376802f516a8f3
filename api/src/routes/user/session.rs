//! Registration, login and token refresh

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tmpl_shared::StandardResponse;

use crate::dto::user::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::handlers::{log_error_response, validation_error_response};
use crate::middleware::RequestIdExt;
use crate::state::{AppState, Backend};

/// Handler for POST /v1/user
///
/// Creates the account when `otp` matches the cached registration code and
/// returns the profile with a fresh token pair.
///
/// ## Errors
/// - 400 `bad_request`: invalid body, `otp expired` or `otp incorrect`
/// - 409 `conflict`: email or user name already taken
pub async fn register<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let request_id = req.request_id();
    log::info!("[{}] Processing registration", request_id);

    if let Err(errors) = body.validate() {
        log::warn!("[{}] Invalid registration body", request_id);
        return validation_error_response(&errors);
    }

    match state.user_service.register(body.into_inner().into()).await {
        Ok(authenticated) => {
            log::info!("[{}] Registered user {}", request_id, authenticated.user.id);
            HttpResponse::Ok().json(StandardResponse::success("", authenticated))
        }
        Err(e) => log_error_response(&request_id, "registration", &e),
    }
}

/// Handler for POST /v1/user/login
///
/// `user_name_or_email` is treated as an email when it is shaped like one.
/// A wrong password answers 400 `wrong_password`.
pub async fn login<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .user_service
        .login(&body.user_name_or_email, &body.password)
        .await
    {
        Ok(authenticated) => {
            log::info!("[{}] User {} logged in", request_id, authenticated.user.id);
            HttpResponse::Ok().json(StandardResponse::success("", authenticated))
        }
        Err(e) => log_error_response(&request_id, "login", &e),
    }
}

/// Handler for POST /v1/user/token/refresh
pub async fn refresh<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<RefreshTokenRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.user_service.refresh(&body.refresh_token).await {
        Ok(tokens) => HttpResponse::Ok().json(StandardResponse::success("", tokens)),
        Err(e) => log_error_response(&request_id, "token refresh", &e),
    }
}
