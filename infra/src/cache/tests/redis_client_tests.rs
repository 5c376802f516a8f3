//! Unit tests for the Redis cache

use tmpl_core::services::otp::CacheServiceTrait;
use tmpl_shared::config::CacheConfig;

use crate::cache::RedisCache;

fn live_cache() -> RedisCache {
    RedisCache::new(&CacheConfig::from_env()).unwrap()
}

#[test]
fn test_client_creation_is_lazy() {
    let config = CacheConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        database: 0,
    };
    assert!(RedisCache::new(&config).is_ok());
}

#[tokio::test]
async fn test_unreachable_server_reports_error() {
    let config = CacheConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        database: 0,
    };
    let cache = RedisCache::new(&config).unwrap();

    assert!(cache.ping().await.is_err());
    assert!(cache.get("otp:a@example.com").await.is_err());
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_basic_operations() {
    let cache = live_cache();
    let key = "test:redis_cache:basic";

    cache.set(key, "value").await.unwrap();
    assert_eq!(cache.get(key).await.unwrap(), Some("value".to_string()));
    assert!(cache.exists(key).await.unwrap());
    assert!(cache.keys("test:redis_cache:*").await.unwrap().contains(&key.to_string()));

    assert!(cache.delete(key).await.unwrap());
    assert!(!cache.delete(key).await.unwrap());
    assert_eq!(cache.get(key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires actual Redis server
async fn test_ttl_expiry() {
    let cache = live_cache();
    let key = "test:redis_cache:ttl";

    cache.set_with_ttl(key, "value", 1).await.unwrap();
    assert!(cache.exists(key).await.unwrap());

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    assert!(!cache.exists(key).await.unwrap());
}
