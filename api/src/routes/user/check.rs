use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tmpl_shared::StandardResponse;

use crate::dto::user::{CheckResponse, OtpCheckQuery, OtpCheckResponse};
use crate::handlers::{log_error_response, validation_error_response};
use crate::middleware::RequestIdExt;
use crate::state::{AppState, Backend};

/// Handler for GET /v1/user/check/{email}
///
/// Answers `login` for a registered address. Otherwise a registration code
/// is cached for the address and emailed to it, and the answer is `register`.
///
/// ```json
/// { "status": "success", "message": "", "data": { "status": "register" } }
/// ```
pub async fn check<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    email: web::Path<String>,
) -> HttpResponse {
    let request_id = req.request_id();
    log::info!("[{}] Processing user check", request_id);

    match state.user_service.check(&email).await {
        Ok(status) => {
            log::info!("[{}] User check answered {:?}", request_id, status);
            HttpResponse::Ok().json(StandardResponse::success("", CheckResponse { status }))
        }
        Err(e) => log_error_response(&request_id, "user check", &e),
    }
}

/// Handler for GET /v1/user/otp?email=..&otp=..
///
/// Reports whether the code matches without consuming it. With no live code
/// for the address the answer is 400 "otp expired", so a client knows to ask
/// for a new one.
pub async fn check_otp<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    query: web::Query<OtpCheckQuery>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = query.validate() {
        log::warn!("[{}] Invalid otp check query", request_id);
        return validation_error_response(&errors);
    }

    match state.user_service.is_otp_right(&query.email, &query.otp).await {
        Ok(is_right) => {
            HttpResponse::Ok().json(StandardResponse::success("", OtpCheckResponse { is_right }))
        }
        Err(e) => log_error_response(&request_id, "otp check", &e),
    }
}
