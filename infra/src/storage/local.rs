//! Uploaded media on the local filesystem

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use tmpl_core::services::media::MediaStorage;

use crate::InfrastructureError;

/// Writes uploads into a single flat directory
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    dir: PathBuf,
}

impl LocalMediaStorage {
    /// Use `dir`, creating it if needed
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, InfrastructureError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!(dir = %dir.display(), "Media directory ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Plain file names only: no separators, no parent references
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        if !is_plain_file_name(file_name) {
            return Err(format!("refusing to write {:?}", file_name));
        }

        let path = self.dir.join(file_name);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
        write_or_remove(&path, &mut file, bytes).await
    }
}

/// Write `bytes` to the freshly created `path`, removing it on failure so no
/// partial upload is left behind
async fn write_or_remove<W>(path: &Path, writer: &mut W, bytes: &[u8]) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                event = "partial_upload_left",
                "Failed to remove partial upload"
            );
        }
        return Err(format!("failed to write {}: {}", path.display(), e));
    }
    Ok(())
}
