//! Token service module for JWT management
//!
//! Issues HS256 access/refresh token pairs and verifies them, reporting an
//! expired token separately from every other failure.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
