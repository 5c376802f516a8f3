use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tmpl_core::DomainError;
use tmpl_shared::{status_codes, StandardResponse};

use crate::dto::user::{PaginationQuery, UpdateProfileRequest};
use crate::handlers::{log_error_response, validation_error_response};
use crate::middleware::{AuthContext, RequestIdExt};
use crate::state::{AppState, Backend};

/// Handler for GET /v1/user/profile
pub async fn profile<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    auth: AuthContext,
) -> HttpResponse {
    let request_id = req.request_id();

    match state.user_service.profile(&auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(StandardResponse::success("", profile)),
        Err(e) => log_error_response(&request_id, "profile", &e),
    }
}

/// Handler for PUT /v1/user
pub async fn update_profile<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    auth: AuthContext,
    body: web::Json<UpdateProfileRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .user_service
        .update_profile(&auth.user_id, &body.user_name)
        .await
    {
        Ok(profile) => {
            log::info!("[{}] Updated profile of {}", request_id, auth.user_id);
            HttpResponse::Ok().json(StandardResponse::success("", profile))
        }
        Err(e) => log_error_response(&request_id, "profile update", &e),
    }
}

/// Handler for DELETE /v1/user
pub async fn delete_account<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    auth: AuthContext,
) -> HttpResponse {
    let request_id = req.request_id();

    match state.user_service.delete_account(&auth.user_id).await {
        Ok(()) => {
            log::info!("[{}] Deleted account {}", request_id, auth.user_id);
            HttpResponse::Ok().json(StandardResponse::message(
                status_codes::SUCCESS,
                "Successfully deleted",
            ))
        }
        Err(e) => log_error_response(&request_id, "account deletion", &e),
    }
}

/// Handler for GET /v1/users?page=..&limit=..
///
/// Admin-only listing ordered by creation time; `count` is the total number
/// of users.
pub async fn list_users<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    query: web::Query<PaginationQuery>,
) -> HttpResponse {
    let request_id = req.request_id();

    let pagination = match query.pagination() {
        Ok(pagination) => pagination,
        Err(e) => return log_error_response(&request_id, "user list", &DomainError::from(e)),
    };

    match state.user_service.list_users(pagination).await {
        Ok(page) => HttpResponse::Ok().json(StandardResponse::success("", page)),
        Err(e) => log_error_response(&request_id, "user list", &e),
    }
}
