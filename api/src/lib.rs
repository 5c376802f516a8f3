//! HTTP layer of the template backend
//!
//! Exposes the user, template and media endpoints over actix-web. The binary
//! wires the Postgres, Redis, SMTP and filesystem adapters into
//! [`state::AppState`]; tests swap them for the in-memory mocks of
//! `tmpl_core` through the [`state::Backend`] trait.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::{AppState, Backend, ProductionBackend};
