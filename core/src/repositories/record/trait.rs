//! Generic single-column helpers shared by every table.
//!
//! Table and column names are closed enums so only known identifiers can ever
//! reach SQL text; values are always bound as parameters.

use async_trait::async_trait;

use crate::errors::{DomainError, DomainResult};

/// Tables reachable through the generic helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Templates,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Templates => "templates",
        }
    }
}

/// Columns reachable through the generic helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    UserName,
    Email,
    HashedPassword,
    RefreshToken,
    Role,
    TemplateName,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::UserName => "user_name",
            Column::Email => "email",
            Column::HashedPassword => "hashed_password",
            Column::RefreshToken => "refresh_token",
            Column::Role => "role",
            Column::TemplateName => "template_name",
        }
    }

    /// Whether the column exists on `table`
    pub fn belongs_to(&self, table: Table) -> bool {
        match table {
            Table::Users => !matches!(self, Column::TemplateName),
            Table::Templates => matches!(self, Column::Id | Column::TemplateName),
        }
    }

    /// Rejects columns foreign to `table`, and `id` when `writable` is set
    pub fn check(&self, table: Table, writable: bool) -> DomainResult<()> {
        if !self.belongs_to(table) {
            return Err(DomainError::internal(format!(
                "column {} does not exist on {}",
                self.as_str(),
                table.as_str()
            )));
        }
        if writable && *self == Column::Id {
            return Err(DomainError::internal("the id column cannot be updated"));
        }
        Ok(())
    }
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Whether any row of `table` has `column = value`
    async fn check_if_exists(&self, table: Table, column: Column, value: &str) -> DomainResult<bool>;

    /// Set `column = value` on the row with `id`, refreshing `updated_at`
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No row has that id
    async fn update_single_field(
        &self,
        table: Table,
        column: Column,
        id: &str,
        value: &str,
    ) -> DomainResult<()>;
}
