//! Utility functions shared across modules

pub mod validation;
