//! Postgres implementation of the TemplateRepository trait.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use tmpl_core::domain::entities::template::{Template, TemplateFilter, TemplateOrder};
use tmpl_core::errors::{DomainError, DomainResult};
use tmpl_core::repositories::TemplateRepository;
use tmpl_shared::types::Page;

use super::map_sqlx_error;

const RESOURCE: &str = "template";

const FIND_BY_ID: &str = r#"
    WITH total AS (
        SELECT COUNT(*) AS count FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
    )
    SELECT total.count AS total_count, page.*
    FROM total
    LEFT JOIN LATERAL (
        SELECT id, template_name, created_at, updated_at, deleted_at
        FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
        ORDER BY id ASC
        LIMIT $2 OFFSET $3
    ) page ON TRUE
"#;

const FIND_NEWEST_FIRST: &str = r#"
    WITH total AS (
        SELECT COUNT(*) AS count FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
    )
    SELECT total.count AS total_count, page.*
    FROM total
    LEFT JOIN LATERAL (
        SELECT id, template_name, created_at, updated_at, deleted_at
        FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
        ORDER BY created_at DESC, id DESC
        LIMIT $2 OFFSET $3
    ) page ON TRUE
"#;

const FIND_OLDEST_FIRST: &str = r#"
    WITH total AS (
        SELECT COUNT(*) AS count FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
    )
    SELECT total.count AS total_count, page.*
    FROM total
    LEFT JOIN LATERAL (
        SELECT id, template_name, created_at, updated_at, deleted_at
        FROM templates
        WHERE deleted_at IS NULL AND ($1::text IS NULL OR template_name ILIKE $1)
        ORDER BY created_at ASC, id ASC
        LIMIT $2 OFFSET $3
    ) page ON TRUE
"#;

/// Listing statement for `order`; the ORDER BY clause is the only difference
pub(crate) fn find_query(order: TemplateOrder) -> &'static str {
    match order {
        TemplateOrder::Id => FIND_BY_ID,
        TemplateOrder::NewestFirst => FIND_NEWEST_FIRST,
        TemplateOrder::OldestFirst => FIND_OLDEST_FIRST,
    }
}

/// Postgres implementation of TemplateRepository
pub struct PgTemplateRepository {
    pool: PgPool,
}

impl PgTemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_template(row: &PgRow) -> DomainResult<Template> {
        let decode = |row: &PgRow| -> Result<Template, sqlx::Error> {
            Ok(Template {
                id: row.try_get("id")?,
                template_name: row.try_get("template_name")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
                deleted_at: row.try_get("deleted_at")?,
            })
        };
        decode(row).map_err(|e| map_sqlx_error(e, RESOURCE))
    }
}

/// `ILIKE` pattern matching names that start with `search`, with LIKE
/// metacharacters in the input escaped
pub(crate) fn prefix_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 1);
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl TemplateRepository for PgTemplateRepository {
    async fn create(&self, template_name: &str) -> DomainResult<Template> {
        let query = r#"
            INSERT INTO templates (template_name)
            VALUES ($1)
            RETURNING id, template_name, created_at, updated_at, deleted_at
        "#;

        let row = sqlx::query(query)
            .bind(template_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::row_to_template(&row)
    }

    async fn get(&self, id: i64) -> DomainResult<Template> {
        let query = r#"
            SELECT id, template_name, created_at, updated_at, deleted_at
            FROM templates
            WHERE id = $1 AND deleted_at IS NULL
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::row_to_template(&row)
    }

    async fn find(&self, filter: &TemplateFilter) -> DomainResult<Page<Template>> {
        let rows = sqlx::query(find_query(filter.order))
            .bind(filter.search.as_deref().map(prefix_pattern))
            .bind(filter.pagination.limit_i64())
            .bind(filter.pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        let mut count = 0;
        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            count = row
                .try_get::<i64, _>("total_count")
                .map_err(|e| map_sqlx_error(e, RESOURCE))?;
            let id: Option<i64> = row.try_get("id").map_err(|e| map_sqlx_error(e, RESOURCE))?;
            if id.is_some() {
                items.push(Self::row_to_template(row)?);
            }
        }

        Ok(Page::new(items, count))
    }

    async fn update(&self, id: i64, template_name: &str) -> DomainResult<Template> {
        let query = r#"
            UPDATE templates SET
                template_name = $2,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, template_name, created_at, updated_at, deleted_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(template_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, RESOURCE))?;

        Self::row_to_template(&row)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let query = r#"
            UPDATE templates SET
                deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
        "#;

        let result = sqlx::query(query)
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
