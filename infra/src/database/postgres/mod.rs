//! Postgres repository implementations

mod error;
mod record_repository_impl;
mod template_repository_impl;
mod user_repository_impl;

pub use record_repository_impl::PgRecordRepository;
pub use template_repository_impl::PgTemplateRepository;
pub use user_repository_impl::PgUserRepository;

pub(crate) use error::map_sqlx_error;
