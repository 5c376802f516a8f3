//! Common type definitions shared across modules

pub mod pagination;
pub mod response;

pub use pagination::{Page, Pagination, PaginationError};
pub use response::StandardResponse;
