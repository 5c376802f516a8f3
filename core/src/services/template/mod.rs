//! Template CRUD over the store

mod service;

pub use service::TemplateService;
