//! # Template Backend Core
//!
//! Core business logic and domain layer for the template backend.
//! This crate contains domain entities, business services, repository and
//! adapter interfaces, and the error types shared by every layer above it.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
