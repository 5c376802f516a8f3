use serde::{Deserialize, Serialize};

/// Name of the multipart field carrying the upload
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub photo_url: String,
}
