//! Template entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tmpl_shared::types::Pagination;

use crate::errors::{DomainError, DomainResult};

/// Longest accepted template name, in characters
pub const TEMPLATE_NAME_MAX_LEN: usize = 255;

/// Generic named resource with soft deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub template_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Template {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Trims `name` and checks it is non-empty and within the length limit
    pub fn validate_name(name: &str) -> DomainResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("template_name must not be empty"));
        }
        if name.chars().count() > TEMPLATE_NAME_MAX_LEN {
            return Err(DomainError::validation(format!(
                "template_name must be at most {} characters",
                TEMPLATE_NAME_MAX_LEN
            )));
        }
        Ok(name.to_string())
    }
}

/// Row order of a template listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplateOrder {
    /// Ascending id
    #[default]
    Id,
    NewestFirst,
    OldestFirst,
}

impl TemplateOrder {
    /// Signed form used by the list query: positive is newest first,
    /// negative oldest first, zero keeps id order
    pub fn from_signed(value: i64) -> Self {
        match value {
            v if v > 0 => TemplateOrder::NewestFirst,
            v if v < 0 => TemplateOrder::OldestFirst,
            _ => TemplateOrder::Id,
        }
    }
}

/// Filter for listing templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub pagination: Pagination,
    /// Case-insensitive name prefix
    pub search: Option<String>,
    pub order: TemplateOrder,
}

impl TemplateFilter {
    pub fn new(pagination: Pagination) -> Self {
        Self {
            pagination,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn ordered(mut self, order: TemplateOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether `template` passes the deletion and search predicates
    pub fn accepts(&self, template: &Template) -> bool {
        if template.is_deleted() {
            return false;
        }
        match &self.search {
            Some(prefix) => template
                .template_name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase()),
            None => true,
        }
    }
}
