use serde::Deserialize;
use validator::Validate;

use tmpl_core::domain::entities::template::{TemplateFilter, TemplateOrder};
use tmpl_shared::PaginationError;

use super::user::PaginationQuery;

/// Body of template create and update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TemplateRequest {
    #[validate(length(min = 1, max = 255))]
    pub template_name: String,
}

/// Query of `GET /v1/template`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Case-insensitive name prefix
    pub search: Option<String>,
    /// Positive sorts newest first, negative oldest first, zero by id
    #[serde(default)]
    pub order_by_created_at: i64,
}

impl TemplateListQuery {
    pub fn filter(&self) -> Result<TemplateFilter, PaginationError> {
        let pagination = PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
        .pagination()?;

        Ok(TemplateFilter::new(pagination)
            .with_search(self.search.clone())
            .ordered(TemplateOrder::from_signed(self.order_by_created_at)))
    }
}
