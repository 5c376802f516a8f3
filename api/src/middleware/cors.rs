//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive. Anything else only admits the origins listed in
//! `ALLOWED_ORIGINS`.
//!
//! # Environment Variables
//! - `ALLOWED_ORIGINS`: Comma-separated list of allowed origins (non-development only)
//! - `CORS_MAX_AGE`: Max age for preflight cache (default: 3600 seconds)

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use tmpl_shared::Environment;

use super::request_id::REQUEST_ID_HEADER;

pub const DEFAULT_CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for `environment`.
pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(DEFAULT_CORS_MAX_AGE);

    if environment.is_development() {
        create_development_cors(max_age)
    } else {
        create_restricted_cors(max_age, &allowed_origins())
    }
}

/// Origins listed in `ALLOWED_ORIGINS`, blanks dropped
pub fn allowed_origins() -> Vec<String> {
    env::var("ALLOWED_ORIGINS")
        .map(|origins| parse_origins(&origins))
        .unwrap_or_default()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

fn create_development_cors(max_age: usize) -> Cors {
    log::info!("Configuring CORS for development environment");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(max_age)
        .supports_credentials()
}

fn create_restricted_cors(max_age: usize, origins: &[String]) -> Cors {
    log::info!("Configuring CORS with {} allowed origin(s)", origins.len());

    let mut cors = Cors::default()
        .allowed_methods(allowed_methods())
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers(vec![header::HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(max_age);

    for origin in origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
