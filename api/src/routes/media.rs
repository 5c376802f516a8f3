use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;

use tmpl_core::DomainError;
use tmpl_shared::{status_codes, StandardResponse};

use crate::dto::media::{UploadResponse, UPLOAD_FIELD};
use crate::handlers::log_error_response;
use crate::middleware::RequestIdExt;
use crate::state::{AppState, Backend};

fn multipart_error(request_id: &str, err: impl std::fmt::Display) -> HttpResponse {
    log::warn!("[{}] Malformed multipart body: {}", request_id, err);
    HttpResponse::BadRequest().json(StandardResponse::message(
        status_codes::BAD_REQUEST,
        "invalid multipart body",
    ))
}

/// Handler for POST /v1/media/upload
///
/// Reads the multipart field `file`. The extension is checked from the
/// submitted filename before any byte is read, and the size limit while the
/// field streams in, so a rejected upload never reaches storage.
///
/// ## Errors
/// - 400 `bad_request`: no `file` field, or extension other than `.jpg`/`.png`
/// - 413 `size_exceeded`: file larger than `MAX_IMAGE_SIZE` megabytes
pub async fn upload<B: Backend>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    mut payload: Multipart,
) -> HttpResponse {
    let request_id = req.request_id();
    let policy = *state.media_service.policy();

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) => return multipart_error(&request_id, e),
        };

        let (name, filename) = {
            let disposition = field.content_disposition();
            (
                disposition.get_name().map(String::from),
                disposition.get_filename().map(String::from),
            )
        };

        if name.as_deref() != Some(UPLOAD_FIELD) {
            while let Some(chunk) = field.next().await {
                if let Err(e) = chunk {
                    return multipart_error(&request_id, e);
                }
            }
            continue;
        }

        let ext = match policy.check_extension(filename.as_deref().unwrap_or_default()) {
            Ok(ext) => ext,
            Err(e) => return log_error_response(&request_id, "upload", &e),
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return multipart_error(&request_id, e),
            };
            if let Err(e) = policy.check_size(bytes.len() + chunk.len()) {
                return log_error_response(&request_id, "upload", &e);
            }
            bytes.extend_from_slice(&chunk);
        }

        return match state.media_service.store(ext, &bytes).await {
            Ok(photo_url) => {
                log::info!("[{}] Stored upload of {} bytes", request_id, bytes.len());
                HttpResponse::Ok().json(StandardResponse::success("", UploadResponse { photo_url }))
            }
            Err(e) => log_error_response(&request_id, "upload", &e),
        };
    }

    log_error_response(
        &request_id,
        "upload",
        &DomainError::validation(format!("multipart field '{}' is required", UPLOAD_FIELD)),
    )
}
