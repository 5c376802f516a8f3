use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::policy::UploadPolicy;
use super::traits::MediaStorage;

pub struct MediaService<M: MediaStorage> {
    storage: Arc<M>,
    policy: UploadPolicy,
    base_url: String,
}

impl<M: MediaStorage> MediaService<M> {
    pub fn new(storage: Arc<M>, policy: UploadPolicy, base_url: impl Into<String>) -> Self {
        Self {
            storage,
            policy,
            base_url: base_url.into(),
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Store bytes that already passed the policy, returning the public URL
    ///
    /// Callers run [`UploadPolicy::check_extension`] before reading the body
    /// and [`UploadPolicy::check_size`] while reading it.
    pub async fn store(&self, ext: &str, bytes: &[u8]) -> DomainResult<String> {
        let file_name = format!("{}{}", Uuid::new_v4(), ext);
        self.storage.save(&file_name, bytes).await.map_err(|e| {
            tracing::error!(error = %e, event = "media_write_failed", "Failed to store upload");
            DomainError::internal("failed to store file")
        })?;
        tracing::info!(file_name = %file_name, size = bytes.len(), event = "media_stored", "Stored upload");
        Ok(self.public_url(&file_name))
    }

    fn public_url(&self, file_name: &str) -> String {
        let base = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };
        format!("{}media/{}", base, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media::MockMediaStorage;

    fn service(max_bytes: usize) -> (MediaService<MockMediaStorage>, MockMediaStorage) {
        let storage = MockMediaStorage::new();
        (
            MediaService::new(
                Arc::new(storage.clone()),
                UploadPolicy::new(max_bytes),
                "http://localhost:8000",
            ),
            storage,
        )
    }

    #[tokio::test]
    async fn test_store_writes_file_under_media_url() {
        let (service, storage) = service(16);
        let ext = service.policy().check_extension("Photo.PNG").unwrap();
        let url = service.store(ext, b"png-bytes").await.unwrap();

        assert!(url.starts_with("http://localhost:8000/media/"));
        assert!(url.ends_with(".png"));
        let name = url.rsplit('/').next().unwrap();
        assert_eq!(storage.file(name).unwrap(), b"png-bytes".to_vec());
    }

    #[tokio::test]
    async fn test_policy_rejects_before_store() {
        let (service, storage) = service(4);

        assert!(matches!(
            service.policy().check_extension("photo.gif"),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            service.policy().check_size(b"too large".len()),
            Err(DomainError::PayloadTooLarge { .. })
        ));
        assert_eq!(storage.file_count(), 0);
    }
}
