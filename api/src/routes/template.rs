//! Template CRUD handlers
//!
//! Reads are open to every signed-in user; writes are admin-only (enforced by
//! the authorization gate, not here).

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use tmpl_core::DomainError;
use tmpl_shared::{status_codes, StandardResponse};

use crate::dto::template::{TemplateListQuery, TemplateRequest};
use crate::handlers::{log_error_response, validation_error_response};
use crate::middleware::RequestIdExt;
use crate::state::{AppState, Backend};

/// Handler for POST /v1/template
pub async fn create<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<TemplateRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state.template_service.create(&body.template_name).await {
        Ok(template) => {
            log::info!("[{}] Created template {}", request_id, template.id);
            HttpResponse::Ok().json(StandardResponse::success("", template))
        }
        Err(e) => log_error_response(&request_id, "template create", &e),
    }
}

/// Handler for GET /v1/template/{id}
pub async fn get<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    id: web::Path<i64>,
) -> HttpResponse {
    let request_id = req.request_id();

    match state.template_service.get(*id).await {
        Ok(template) => HttpResponse::Ok().json(StandardResponse::success("", template)),
        Err(e) => log_error_response(&request_id, "template get", &e),
    }
}

/// Handler for GET /v1/template?page&limit&search&order_by_created_at
///
/// Returns `{items, count}` where `count` is the number of live templates
/// matching `search`, independent of the page.
pub async fn list<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    query: web::Query<TemplateListQuery>,
) -> HttpResponse {
    let request_id = req.request_id();

    let filter = match query.filter() {
        Ok(filter) => filter,
        Err(e) => return log_error_response(&request_id, "template list", &DomainError::from(e)),
    };

    match state.template_service.find(&filter).await {
        Ok(page) => HttpResponse::Ok().json(StandardResponse::success("", page)),
        Err(e) => log_error_response(&request_id, "template list", &e),
    }
}

/// Handler for PUT /v1/template/{id}
pub async fn update<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    id: web::Path<i64>,
    body: web::Json<TemplateRequest>,
) -> HttpResponse {
    let request_id = req.request_id();

    if let Err(errors) = body.validate() {
        return validation_error_response(&errors);
    }

    match state
        .template_service
        .update(*id, &body.template_name)
        .await
    {
        Ok(template) => HttpResponse::Ok().json(StandardResponse::success("", template)),
        Err(e) => log_error_response(&request_id, "template update", &e),
    }
}

/// Handler for DELETE /v1/template/{id}
///
/// Soft delete: the row is kept with `deleted_at` set and disappears from
/// reads and listings.
pub async fn delete<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    id: web::Path<i64>,
) -> HttpResponse {
    let request_id = req.request_id();

    match state.template_service.delete(*id).await {
        Ok(()) => {
            log::info!("[{}] Deleted template {}", request_id, *id);
            HttpResponse::Ok().json(StandardResponse::message(
                status_codes::SUCCESS,
                "Successfully deleted",
            ))
        }
        Err(e) => log_error_response(&request_id, "template delete", &e),
    }
}
