//! Behaviour of the in-memory repositories used throughout the test suites

use tmpl_shared::types::Pagination;

use crate::domain::entities::template::TemplateFilter;
use crate::domain::entities::user::{User, UserLookup, UserUpdate};
use crate::errors::DomainError;
use crate::repositories::{
    Column, MockDatabase, RecordRepository, Table, TemplateRepository, UserRepository,
};

#[tokio::test]
async fn test_user_create_rejects_duplicates() {
    let db = MockDatabase::new();
    UserRepository::create(&db, User::new("jane", "jane@example.com", "h"))
        .await
        .unwrap();

    let dup_email = UserRepository::create(&db, User::new("other", "jane@example.com", "h")).await;
    assert!(matches!(dup_email, Err(DomainError::Conflict { .. })));

    let dup_name = UserRepository::create(&db, User::new("jane", "other@example.com", "h")).await;
    assert!(matches!(dup_name, Err(DomainError::Conflict { .. })));

    assert_eq!(db.user_count().await, 1);
}

#[tokio::test]
async fn test_user_get_and_update() {
    let db = MockDatabase::new();
    let user = UserRepository::create(&db, User::new("jane", "jane@example.com", "h"))
        .await
        .unwrap();

    let found = UserRepository::get(&db, &UserLookup::UserName("jane".into()))
        .await
        .unwrap();
    assert_eq!(found.id, user.id);

    let updated = UserRepository::update(
        &db,
        UserUpdate {
            id: user.id.clone(),
            user_name: Some("jane_doe".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.user_name, "jane_doe");
    assert!(updated.updated_at >= user.updated_at);

    let missing = UserRepository::get(&db, &UserLookup::Email("nobody@example.com".into())).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_template_find_paginates_and_skips_deleted() {
    let db = MockDatabase::new();
    for name in ["alpha", "beta", "gamma", "delta", "epsilon"] {
        TemplateRepository::create(&db, name).await.unwrap();
    }
    TemplateRepository::delete(&db, 2).await.unwrap();

    let filter = TemplateFilter::new(Pagination::new(Some(2), Some(2)).unwrap());
    let page = TemplateRepository::find(&db, &filter).await.unwrap();
    assert_eq!(page.count, 4);
    let ids: Vec<i64> = page.items.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 5]);

    assert!(matches!(
        TemplateRepository::get(&db, 2).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(db.raw_template(2).await.unwrap().deleted_at.is_some());
}

#[tokio::test]
async fn test_record_helpers() {
    let db = MockDatabase::new();
    let user = UserRepository::create(&db, User::new("jane", "jane@example.com", "h"))
        .await
        .unwrap();

    assert!(db
        .check_if_exists(Table::Users, Column::Email, "jane@example.com")
        .await
        .unwrap());
    assert!(!db
        .check_if_exists(Table::Users, Column::Email, "john@example.com")
        .await
        .unwrap());

    db.update_single_field(Table::Users, Column::HashedPassword, &user.id, "new-hash")
        .await
        .unwrap();
    let stored = db.user_by_email("jane@example.com").await.unwrap();
    assert_eq!(stored.hashed_password, "new-hash");

    let missing = db
        .update_single_field(Table::Users, Column::RefreshToken, "no-such-id", "x")
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_failing_database() {
    let db = MockDatabase::new();
    db.set_failing(true);
    let result = TemplateRepository::create(&db, "alpha").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_user_reset_password_clears_refresh_token() {
    let db = MockDatabase::new();
    let user = UserRepository::create(
        &db,
        User::new("jane", "jane@example.com", "old-hash").with_refresh_token("rt".to_string()),
    )
    .await
    .unwrap();

    UserRepository::reset_password(&db, &user.id, "new-hash").await.unwrap();

    let stored = db.user_by_email("jane@example.com").await.unwrap();
    assert_eq!(stored.hashed_password, "new-hash");
    assert!(stored.refresh_token.is_empty());

    let missing = UserRepository::reset_password(&db, "nobody", "h").await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}
