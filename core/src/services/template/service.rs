use std::sync::Arc;
use std::time::Duration;

use tmpl_shared::types::Page;

use crate::domain::entities::template::{Template, TemplateFilter};
use crate::errors::DomainResult;
use crate::repositories::TemplateRepository;
use crate::services::deadline::with_deadline;

/// Validates names and bounds every store call by the request timeout
pub struct TemplateService<T: TemplateRepository> {
    templates: Arc<T>,
    request_timeout: Duration,
}

impl<T: TemplateRepository> TemplateService<T> {
    pub fn new(templates: Arc<T>, request_timeout: Duration) -> Self {
        Self {
            templates,
            request_timeout,
        }
    }

    pub async fn create(&self, template_name: &str) -> DomainResult<Template> {
        let name = Template::validate_name(template_name)?;
        let template = with_deadline(self.request_timeout, self.templates.create(&name)).await?;
        tracing::info!(template_id = template.id, event = "template_created", "Created template");
        Ok(template)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Template> {
        with_deadline(self.request_timeout, self.templates.get(id)).await
    }

    pub async fn find(&self, filter: &TemplateFilter) -> DomainResult<Page<Template>> {
        with_deadline(self.request_timeout, self.templates.find(filter)).await
    }

    pub async fn update(&self, id: i64, template_name: &str) -> DomainResult<Template> {
        let name = Template::validate_name(template_name)?;
        with_deadline(self.request_timeout, self.templates.update(id, &name)).await
    }

    /// Soft delete
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        with_deadline(self.request_timeout, self.templates.delete(id)).await?;
        tracing::info!(template_id = id, event = "template_deleted", "Deleted template");
        Ok(())
    }
}
