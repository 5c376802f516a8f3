//! In-memory store implementing every repository trait

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use tmpl_shared::types::{Page, Pagination};

use crate::domain::entities::template::{Template, TemplateFilter, TemplateOrder};
use crate::domain::entities::user::{User, UserLookup, UserUpdate};
use crate::errors::{DomainError, DomainResult};

use super::record::{Column, RecordRepository, Table};
use super::template::TemplateRepository;
use super::user::UserRepository;

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    templates: HashMap<i64, Template>,
    next_template_id: i64,
}

/// Mock database for testing
///
/// Clones share the same tables, so one instance can back the user, template
/// and record repositories at once.
#[derive(Clone, Default)]
pub struct MockDatabase {
    tables: Arc<RwLock<Tables>>,
    should_fail: Arc<AtomicBool>,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    /// Stored row including secrets, for assertions
    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let lookup = UserLookup::Email(email.to_string());
        self.tables
            .read()
            .await
            .users
            .values()
            .find(|u| lookup.matches(u))
            .cloned()
    }

    /// Raw template row, including soft-deleted ones
    pub async fn raw_template(&self, id: i64) -> Option<Template> {
        self.tables.read().await.templates.get(&id).cloned()
    }

    fn check_failure(&self) -> DomainResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("mock database failure"));
        }
        Ok(())
    }
}

fn paginate<T: Clone>(rows: Vec<T>, pagination: Pagination) -> Page<T> {
    let count = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit as usize)
        .collect();
    Page::new(items, count)
}

#[async_trait]
impl UserRepository for MockDatabase {
    async fn create(&self, user: User) -> DomainResult<User> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email already exists"));
        }
        if tables.users.values().any(|u| u.user_name == user.user_name) {
            return Err(DomainError::conflict("user_name already exists"));
        }

        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get(&self, lookup: &UserLookup) -> DomainResult<User> {
        self.check_failure()?;
        let tables = self.tables.read().await;
        tables
            .users
            .values()
            .find(|u| lookup.matches(u))
            .cloned()
            .ok_or_else(|| DomainError::not_found("user"))
    }

    async fn find(&self, pagination: Pagination) -> DomainResult<Page<User>> {
        self.check_failure()?;
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(paginate(users, pagination))
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;

        if let Some(name) = &update.user_name {
            if tables
                .users
                .values()
                .any(|u| &u.user_name == name && u.id != update.id)
            {
                return Err(DomainError::conflict("user_name already exists"));
            }
        }

        let user = tables
            .users
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::not_found("user"))?;
        if let Some(name) = update.user_name {
            user.user_name = name;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn reset_password(&self, id: &str, hashed_password: &str) -> DomainResult<()> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("user"))?;
        user.hashed_password = hashed_password.to_string();
        user.refresh_token.clear();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        tables
            .users
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("user"))
    }
}

#[async_trait]
impl TemplateRepository for MockDatabase {
    async fn create(&self, template_name: &str) -> DomainResult<Template> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        tables.next_template_id += 1;
        let now = Utc::now();
        let template = Template {
            id: tables.next_template_id,
            template_name: template_name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn get(&self, id: i64) -> DomainResult<Template> {
        self.check_failure()?;
        let tables = self.tables.read().await;
        tables
            .templates
            .get(&id)
            .filter(|t| !t.is_deleted())
            .cloned()
            .ok_or_else(|| DomainError::not_found("template"))
    }

    async fn find(&self, filter: &TemplateFilter) -> DomainResult<Page<Template>> {
        self.check_failure()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<Template> = tables
            .templates
            .values()
            .filter(|t| filter.accepts(t))
            .cloned()
            .collect();
        match filter.order {
            TemplateOrder::Id => rows.sort_by_key(|t| t.id),
            TemplateOrder::NewestFirst => {
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)))
            }
            TemplateOrder::OldestFirst => {
                rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)))
            }
        }
        Ok(paginate(rows, filter.pagination))
    }

    async fn update(&self, id: i64, template_name: &str) -> DomainResult<Template> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let template = tables
            .templates
            .get_mut(&id)
            .filter(|t| !t.is_deleted())
            .ok_or_else(|| DomainError::not_found("template"))?;
        template.template_name = template_name.to_string();
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.check_failure()?;
        let mut tables = self.tables.write().await;
        let template = tables
            .templates
            .get_mut(&id)
            .filter(|t| !t.is_deleted())
            .ok_or_else(|| DomainError::not_found("template"))?;
        let now = Utc::now();
        template.deleted_at = Some(now);
        template.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for MockDatabase {
    async fn check_if_exists(&self, table: Table, column: Column, value: &str) -> DomainResult<bool> {
        self.check_failure()?;
        column.check(table, false)?;
        let tables = self.tables.read().await;
        let exists = match table {
            Table::Users => tables.users.values().any(|u| match column {
                Column::Id => u.id == value,
                Column::UserName => u.user_name == value,
                Column::Email => u.email == value,
                Column::HashedPassword => u.hashed_password == value,
                Column::RefreshToken => u.refresh_token == value,
                Column::Role => u.role.as_str() == value,
                Column::TemplateName => false,
            }),
            Table::Templates => tables.templates.values().any(|t| match column {
                Column::Id => t.id.to_string() == value,
                Column::TemplateName => t.template_name == value,
                _ => false,
            }),
        };
        Ok(exists)
    }

    async fn update_single_field(
        &self,
        table: Table,
        column: Column,
        id: &str,
        value: &str,
    ) -> DomainResult<()> {
        self.check_failure()?;
        column.check(table, true)?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        match table {
            Table::Users => {
                let user = tables
                    .users
                    .get_mut(id)
                    .ok_or_else(|| DomainError::not_found("users"))?;
                match column {
                    Column::UserName => user.user_name = value.to_string(),
                    Column::Email => user.email = value.to_string(),
                    Column::HashedPassword => user.hashed_password = value.to_string(),
                    Column::RefreshToken => user.refresh_token = value.to_string(),
                    Column::Role => {
                        user.role = value.parse().map_err(DomainError::validation)?;
                    }
                    Column::Id | Column::TemplateName => {
                        return Err(DomainError::internal("column is not writable on users"));
                    }
                }
                user.updated_at = now;
            }
            Table::Templates => {
                let id: i64 = id.parse().map_err(|_| DomainError::not_found("templates"))?;
                let template = tables
                    .templates
                    .get_mut(&id)
                    .ok_or_else(|| DomainError::not_found("templates"))?;
                template.template_name = value.to_string();
                template.updated_at = now;
            }
        }
        Ok(())
    }
}
