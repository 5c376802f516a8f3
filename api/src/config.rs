//! Startup configuration loading

use std::env;
use std::path::Path;

use tmpl_shared::AppConfig;

/// Location of the optional `.env` file when `DOT_ENV_PATH` is unset
pub const DEFAULT_DOT_ENV_PATH: &str = "config/.env";

/// Load `.env` (if present) and build the configuration from the environment
///
/// Variables already set in the process environment win over the file.
pub fn load_config() -> AppConfig {
    let path = env::var("DOT_ENV_PATH").unwrap_or_else(|_| DEFAULT_DOT_ENV_PATH.to_string());
    if Path::new(&path).exists() {
        match dotenvy::from_path(&path) {
            Ok(()) => log::info!("Loaded environment from {}", path),
            Err(e) => log::warn!("Failed to read {}: {}", path, e),
        }
    }
    AppConfig::from_env()
}
