//! Classification of driver errors into domain errors

use tmpl_core::errors::DomainError;

/// Map a SQLx error for `resource` onto the domain taxonomy
///
/// Missing rows become `NotFound`, unique violations `Conflict`. Everything
/// else is logged here and surfaces as a generic `Internal` error.
pub(crate) fn map_sqlx_error(err: sqlx::Error, resource: &str) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::not_found(resource),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            let field = db_err
                .constraint()
                .and_then(conflicting_field)
                .unwrap_or(resource);
            DomainError::conflict(format!("{} already exists", field))
        }
        _ => {
            tracing::error!(resource, error = %err, event = "database_error", "Database operation failed");
            DomainError::internal("database error")
        }
    }
}

/// Column named by a default Postgres unique constraint such as `users_email_key`
fn conflicting_field(constraint: &str) -> Option<&'static str> {
    match constraint {
        c if c.contains("email") => Some("email"),
        c if c.contains("user_name") => Some("user_name"),
        _ => None,
    }
}
