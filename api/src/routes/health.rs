use actix_web::HttpResponse;

use tmpl_shared::StandardResponse;

/// Liveness probe; does not touch the store or the cache
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(StandardResponse::success(
        "healthy",
        serde_json::json!({
            "service": "tmpl-api",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    ))
}
