//! Per-request time bound for store and cache work

use std::future::Future;
use std::time::Duration;

use crate::errors::{DomainError, DomainResult};

/// Runs `operation`, failing with an internal error once `limit` has elapsed
pub async fn with_deadline<T, F>(limit: Duration, operation: F) -> DomainResult<T>
where
    F: Future<Output = DomainResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                timeout_ms = limit.as_millis() as u64,
                event = "request_deadline_exceeded",
                "Operation exceeded its deadline"
            );
            Err(DomainError::internal("operation timed out"))
        }
    }
}
