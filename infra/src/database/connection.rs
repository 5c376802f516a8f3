//! Database connection pool management
//!
//! Builds the SQLx Postgres pool from `DatabaseConfig`, retrying the initial
//! connection so the service can start before the database is ready.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::time::Duration;
use tracing::log::LevelFilter;

use tmpl_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect, making up to `connect_attempts` attempts spaced by
    /// `connect_timeout` seconds
    ///
    /// # Example
    /// ```no_run
    /// use tmpl_infra::database::DatabasePool;
    /// use tmpl_shared::config::DatabaseConfig;
    ///
    /// async fn create_pool() -> Result<DatabasePool, Box<dyn std::error::Error>> {
    ///     let pool = DatabasePool::connect(&DatabaseConfig::from_env()).await?;
    ///     pool.run_migrations().await?;
    ///     Ok(pool)
    /// }
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            url = %config.masked_url(),
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let timeout = Duration::from_secs(config.connect_timeout);
        let attempts = config.connect_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(1)
                .acquire_timeout(timeout)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(1800))
                .connect_with(connect_options(config))
                .await
            {
                Ok(pool) => {
                    tracing::info!(attempt, "Database connection pool created successfully");
                    return Ok(Self { pool });
                }
                Err(e) if attempt < attempts => {
                    tracing::warn!(
                        attempt,
                        attempts,
                        error = %e,
                        "Failed to connect to database, retrying in {}s",
                        config.connect_timeout
                    );
                    tokio::time::sleep(timeout).await;
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Failed to create database pool");
                    return Err(InfrastructureError::Database(e));
                }
            }
        }
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the migrations embedded from `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}

pub(crate) fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.database)
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1))
}
