//! # Infrastructure Layer
//!
//! Concrete adapters behind the traits declared in `tmpl_core`:
//!
//! - **Database**: Postgres repositories using SQLx, plus pool setup and
//!   embedded migrations
//! - **Cache**: Redis key/value store holding one-time codes
//! - **Email**: SMTP delivery through lettre, or console output in development
//! - **Storage**: uploaded media on the local filesystem

pub mod cache;
pub mod database;
pub mod email;
pub mod storage;

pub use cache::RedisCache;
pub use database::{DatabasePool, PgRecordRepository, PgTemplateRepository, PgUserRepository};
pub use email::{create_email_service, ConsoleEmailService, EmailService, SmtpEmailService};
pub use storage::LocalMediaStorage;

/// Infrastructure-specific error types
///
/// Raised while wiring adapters at startup. Once running, adapters report
/// failures through `DomainError` or the `String` errors of the core traits.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Email service error: {0}")]
    Email(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
