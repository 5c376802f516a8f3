//! Server configuration module

use serde::{Deserialize, Serialize};

use super::{env_or, env_string};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Public base URL, ends with a slash; used to build media links
    pub base_url: String,

    /// Upper bound for every store and cache call made by a request, in seconds
    pub request_timeout: u64,

    /// Largest accepted upload in megabytes
    pub max_image_size_mb: u64,

    /// Directory uploaded media is written to
    pub media_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8000,
            base_url: String::from("http://localhost:8000/"),
            request_timeout: 7,
            max_image_size_mb: 5,
            media_dir: String::from("./media"),
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut base_url = env_string("BASE_URL", &defaults.base_url);
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            host: env_string("HTTP_HOST", &defaults.host),
            port: env_or("HTTP_PORT", defaults.port),
            base_url,
            request_timeout: env_or("CONTEXT_TIMEOUT", defaults.request_timeout),
            max_image_size_mb: env_or("MAX_IMAGE_SIZE", defaults.max_image_size_mb),
            media_dir: env_string("MEDIA_DIR", &defaults.media_dir),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upload size cap in bytes
    pub fn max_image_size_bytes(&self) -> usize {
        (self.max_image_size_mb as usize) << 20
    }
}
