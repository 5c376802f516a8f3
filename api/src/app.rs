//! Application factory
//!
//! Builds the actix-web `App` from ready-made state so the server binary and
//! the integration tests run exactly the same routes and middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, PathError, QueryPayloadError},
    middleware::Logger,
    web, App, HttpResponse,
};

use tmpl_shared::{status_codes, Environment, StandardResponse};

use crate::handlers::extractor_error;
use crate::middleware::{create_cors, AuthorizationGate, RequestIdMiddleware};
use crate::routes;
use crate::state::{AppState, Backend};

/// Access log line; the last field is the request id
pub const LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms %{x-request-id}o"#;

/// Create and configure the application with all dependencies
///
/// Middleware, outermost first: access log, request id, CORS, then the
/// authorization gate right in front of the routes.
pub fn create_app<B: Backend>(
    app_state: web::Data<AppState<B>>,
    gate: AuthorizationGate,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(extractor_error::<JsonPayloadError>))
        .app_data(web::QueryConfig::default().error_handler(extractor_error::<QueryPayloadError>))
        .app_data(web::PathConfig::default().error_handler(extractor_error::<PathError>))
        .wrap(gate)
        .wrap(create_cors(environment))
        .wrap(RequestIdMiddleware)
        .wrap(Logger::new(LOG_FORMAT))
        .route("/health", web::get().to(routes::health::health_check))
        .configure(routes::configure::<B>)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(StandardResponse::message(
        status_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
