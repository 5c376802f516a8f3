use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tmpl_shared::{status_codes, StandardResponse};

use crate::dto::user::ResetPasswordRequest;
use crate::handlers::{log_error_response, validation_error_response};
use crate::middleware::RequestIdExt;
use crate::state::{AppState, Backend};

/// Handler for GET /v1/user/forgot-password/{user_name_or_email}
///
/// Emails a reset code to the account's address.
pub async fn forgot_password<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    user_name_or_email: web::Path<String>,
) -> HttpResponse {
    let request_id = req.request_id();
    log::info!("[{}] Processing forgot-password request", request_id);

    match state.user_service.forgot_password(&user_name_or_email).await {
        Ok(()) => HttpResponse::Ok().json(StandardResponse::message(
            status_codes::SUCCESS,
            "Verification code sent to email",
        )),
        Err(e) => log_error_response(&request_id, "forgot password", &e),
    }
}

/// Handler for POST /v1/user/forgot-password/verify
///
/// Sets the new password when the code matches; every session of the
/// account is signed out.
pub async fn reset_password<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<ResetPasswordRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.user_service.reset_password(body.into_inner().into()).await {
        Ok(()) => {
            log::info!("[{}] Password reset completed", request_id);
            HttpResponse::Ok().json(StandardResponse::message(
                status_codes::SUCCESS,
                "Password successfully updated",
            ))
        }
        Err(e) => log_error_response(&request_id, "password reset", &e),
    }
}
