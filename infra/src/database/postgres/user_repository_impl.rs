//! Postgres implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use tmpl_core::domain::entities::user::{User, UserLookup, UserUpdate};
use tmpl_core::domain::value_objects::Role;
use tmpl_core::errors::{DomainError, DomainResult};
use tmpl_core::repositories::UserRepository;
use tmpl_shared::types::{Page, Pagination};

use super::map_sqlx_error;

const RESOURCE: &str = "user";

/// Postgres implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Map a row carrying the full user column list onto the entity
    fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
        let role: String = row.try_get("role")?;
        Ok(User {
            id: row.try_get("id")?,
            user_name: row.try_get("user_name")?,
            email: row.try_get("email")?,
            hashed_password: row.try_get("hashed_password")?,
            refresh_token: row.try_get("refresh_token")?,
            role: role.parse::<Role>().unwrap_or_default(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn decode(row: &PgRow) -> DomainResult<User> {
        Self::row_to_user(row).map_err(|e| map_sqlx_error(e, RESOURCE))
    }
}

/// `SELECT` for a single-column lookup; the column name is fixed per variant
pub(crate) fn lookup_query(lookup: &UserLookup) -> &'static str {
    match lookup {
        UserLookup::Id(_) => {
            r#"
            SELECT id, user_name, email, hashed_password, refresh_token, role,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#
        }
        UserLookup::Email(_) => {
            r#"
            SELECT id, user_name, email, hashed_password, refresh_token, role,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#
        }
        UserLookup::UserName(_) => {
            r#"
            SELECT id, user_name, email, hashed_password, refresh_token, role,
                   created_at, updated_at
            FROM users
            WHERE user_name = $1
            "#
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> DomainResult<User> {
        let query = r#"
            INSERT INTO users (
                id, user_name, email, hashed_password, refresh_token, role,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_name, email, hashed_password, refresh_token, role,
                      created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(&user.id)
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(&user.hashed_password)
            .bind(&user.refresh_token)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::decode(&row)
    }

    async fn get(&self, lookup: &UserLookup) -> DomainResult<User> {
        let row = sqlx::query(lookup_query(lookup))
            .bind(lookup.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::decode(&row)
    }

    async fn find(&self, pagination: Pagination) -> DomainResult<Page<User>> {
        // One statement: the total is joined to the page so an empty page
        // still reports it.
        let query = r#"
            WITH total AS (SELECT COUNT(*) AS count FROM users)
            SELECT total.count AS total_count, page.*
            FROM total
            LEFT JOIN LATERAL (
                SELECT id, user_name, email, hashed_password, refresh_token, role,
                       created_at, updated_at
                FROM users
                ORDER BY created_at, id
                LIMIT $1 OFFSET $2
            ) page ON TRUE
        "#;

        let rows = sqlx::query(query)
            .bind(pagination.limit_i64())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        let mut count = 0;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            count = row
                .try_get::<i64, _>("total_count")
                .map_err(|e| map_sqlx_error(e, RESOURCE))?;
            let id: Option<String> = row.try_get("id").map_err(|e| map_sqlx_error(e, RESOURCE))?;
            if id.is_some() {
                items.push(Self::decode(row)?);
            }
        }

        Ok(Page::new(items, count))
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let query = r#"
            UPDATE users SET
                user_name = COALESCE($2, user_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_name, email, hashed_password, refresh_token, role,
                      created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(&update.id)
            .bind(update.user_name.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::decode(&row)
    }

    async fn reset_password(&self, id: &str, hashed_password: &str) -> DomainResult<()> {
        let query = r#"
            UPDATE users SET
                hashed_password = $2,
                refresh_token = '',
                updated_at = NOW()
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(hashed_password)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(RESOURCE));
        }
        Ok(())
    }
}
