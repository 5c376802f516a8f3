//! Cache module for Redis-backed key/value storage

pub mod redis_client;

#[cfg(test)]
mod tests;

pub use redis_client::RedisCache;

// Re-export commonly used types
pub use tmpl_shared::config::CacheConfig;
