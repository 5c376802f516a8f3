//! Request and response bodies of the HTTP API

pub mod media;
pub mod template;
pub mod user;
