//! Generic single-column helpers over any table.

use async_trait::async_trait;
use sqlx::PgPool;

use tmpl_core::domain::value_objects::Role;
use tmpl_core::errors::{DomainError, DomainResult};
use tmpl_core::repositories::{Column, RecordRepository, Table};

use super::map_sqlx_error;

pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Identifiers come from the closed `Table`/`Column` enums; values are bound.
/// Both sides are compared as text so the same statement serves `BIGINT` ids.
pub(crate) fn exists_sql(table: Table, column: Column) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {}::text = $1)",
        table.as_str(),
        column.as_str()
    )
}

pub(crate) fn update_sql(table: Table, column: Column) -> String {
    format!(
        "UPDATE {} SET {} = $1, updated_at = NOW() WHERE id::text = $2",
        table.as_str(),
        column.as_str()
    )
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn check_if_exists(&self, table: Table, column: Column, value: &str) -> DomainResult<bool> {
        column.check(table, false)?;

        sqlx::query_scalar::<_, bool>(&exists_sql(table, column))
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, table.as_str()))
    }

    async fn update_single_field(
        &self,
        table: Table,
        column: Column,
        id: &str,
        value: &str,
    ) -> DomainResult<()> {
        column.check(table, true)?;
        if column == Column::Role {
            value.parse::<Role>().map_err(DomainError::validation)?;
        }

        let result = sqlx::query(&update_sql(table, column))
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, table.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(table.as_str()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_sql() {
        assert_eq!(
            exists_sql(Table::Users, Column::Email),
            "SELECT EXISTS(SELECT 1 FROM users WHERE email::text = $1)"
        );
    }

    #[test]
    fn test_update_sql() {
        assert_eq!(
            update_sql(Table::Users, Column::RefreshToken),
            "UPDATE users SET refresh_token = $1, updated_at = NOW() WHERE id::text = $2"
        );
        assert_eq!(
            update_sql(Table::Templates, Column::TemplateName),
            "UPDATE templates SET template_name = $1, updated_at = NOW() WHERE id::text = $2"
        );
    }
}
