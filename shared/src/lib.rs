//! Shared utilities and common types for the template backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The response envelope and its status codes
//! - Pagination parameters
//! - Small validation helpers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, EmailConfig, EmailProvider, Environment,
    JwtConfig, LoggingConfig, OtpConfig, ServerConfig,
};
pub use errors::status_codes;
pub use types::{Page, Pagination, PaginationError, StandardResponse};
pub use utils::validation;
