use crate::errors::{DomainError, DomainResult};

/// Accepted image extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Limits applied to an upload before it is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Canonical lowercase extension of `filename`
    pub fn check_extension(&self, filename: &str) -> DomainResult<&'static str> {
        let ext = filename
            .rfind('.')
            .map(|pos| filename[pos..].to_ascii_lowercase())
            .unwrap_or_default();

        ALLOWED_EXTENSIONS
            .iter()
            .find(|allowed| **allowed == ext)
            .copied()
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "file extension must be one of {}",
                    ALLOWED_EXTENSIONS.join(", ")
                ))
            })
    }

    pub fn check_size(&self, len: usize) -> DomainResult<()> {
        if len > self.max_bytes {
            return Err(DomainError::PayloadTooLarge {
                message: format!("file exceeds the {} byte limit", self.max_bytes),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let policy = UploadPolicy::new(10);
        assert_eq!(policy.check_extension("cat.jpg").unwrap(), ".jpg");
        assert_eq!(policy.check_extension("CAT.PNG").unwrap(), ".png");
        assert_eq!(policy.check_extension("archive.tar.png").unwrap(), ".png");
        assert!(policy.check_extension("cat.jpeg").is_err());
        assert!(policy.check_extension("cat.gif").is_err());
        assert!(policy.check_extension("jpg").is_err());
        assert!(policy.check_extension("").is_err());
    }

    #[test]
    fn test_size() {
        let policy = UploadPolicy::new(10);
        assert!(policy.check_size(10).is_ok());
        assert!(matches!(
            policy.check_size(11),
            Err(DomainError::PayloadTooLarge { .. })
        ));
    }
}
