//! Connection pool tests

use tmpl_shared::config::DatabaseConfig;

use crate::database::DatabasePool;
use crate::InfrastructureError;

#[tokio::test]
async fn test_connect_gives_up_after_configured_attempts() {
    let config = DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        connect_timeout: 1,
        connect_attempts: 1,
        ..Default::default()
    };

    let result = DatabasePool::connect(&config).await;
    assert!(matches!(result, Err(InfrastructureError::Database(_))));
}

#[tokio::test]
#[ignore] // Requires a running Postgres
async fn test_connect_migrate_and_health_check() {
    let pool = DatabasePool::connect(&DatabaseConfig::from_env()).await.unwrap();
    pool.run_migrations().await.unwrap();
    pool.health_check().await.unwrap();
    pool.close().await;
}
