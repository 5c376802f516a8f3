//! Identifier whitelisting for the generic helpers

use crate::errors::DomainError;
use crate::repositories::{Column, Table};

#[test]
fn test_identifiers_render_as_static_names() {
    assert_eq!(Table::Users.as_str(), "users");
    assert_eq!(Table::Templates.as_str(), "templates");
    assert_eq!(Column::HashedPassword.as_str(), "hashed_password");
    assert_eq!(Column::TemplateName.as_str(), "template_name");
}

#[test]
fn test_columns_belong_to_their_tables() {
    assert!(Column::Email.belongs_to(Table::Users));
    assert!(!Column::Email.belongs_to(Table::Templates));
    assert!(Column::TemplateName.belongs_to(Table::Templates));
    assert!(!Column::TemplateName.belongs_to(Table::Users));
    assert!(Column::Id.belongs_to(Table::Templates));
}

#[test]
fn test_check_rejects_id_writes_and_foreign_columns() {
    assert!(Column::Id.check(Table::Users, false).is_ok());
    assert!(matches!(
        Column::Id.check(Table::Users, true),
        Err(DomainError::Internal { .. })
    ));
    assert!(matches!(
        Column::Role.check(Table::Templates, false),
        Err(DomainError::Internal { .. })
    ));
}
