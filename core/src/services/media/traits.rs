use async_trait::async_trait;

/// Destination for uploaded media
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist `bytes` under `file_name`, replacing nothing that exists
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String>;
}
