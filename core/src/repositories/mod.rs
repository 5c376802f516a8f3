//! Repository interfaces for the relational store.
//!
//! Implementations live in the infrastructure crate. An in-memory
//! [`MockDatabase`] implementing every trait is available to tests and, with
//! the `mocks` feature, to downstream crates.

pub mod record;
pub mod template;
pub mod user;

#[cfg(any(test, feature = "mocks"))]
mod mock;

#[cfg(test)]
mod tests;

pub use record::{Column, RecordRepository, Table};
pub use template::TemplateRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "mocks"))]
pub use mock::MockDatabase;
