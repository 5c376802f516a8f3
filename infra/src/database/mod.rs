//! Database module - Postgres implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management with startup retries
//! - Embedded migrations
//! - Repository implementations for users, templates and generic records

pub mod connection;
pub mod postgres;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::{PgRecordRepository, PgTemplateRepository, PgUserRepository};
