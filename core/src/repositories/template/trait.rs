//! Template repository trait

use async_trait::async_trait;

use tmpl_shared::types::Page;

use crate::domain::entities::template::{Template, TemplateFilter};
use crate::errors::DomainResult;

/// Persistence operations for templates
///
/// Soft-deleted templates are invisible to `get`, `find`, `update` and `delete`.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Insert a template and return it with its assigned id
    async fn create(&self, template_name: &str) -> DomainResult<Template>;

    async fn get(&self, id: i64) -> DomainResult<Template>;

    /// One page of live templates matching the filter, plus the total count
    async fn find(&self, filter: &TemplateFilter) -> DomainResult<Page<Template>>;

    /// Rename a template, refreshing `updated_at`
    async fn update(&self, id: i64, template_name: &str) -> DomainResult<Template>;

    /// Soft delete: stamps `deleted_at`
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
