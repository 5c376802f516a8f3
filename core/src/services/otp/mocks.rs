//! In-memory cache and email doubles for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::domain::entities::otp::OtpPurpose;

use super::traits::{CacheServiceTrait, EmailServiceTrait};

type Entry = (String, Option<Instant>);

/// Mock cache honouring TTLs against the wall clock
#[derive(Clone, Default)]
pub struct MockCacheService {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    should_fail: Arc<AtomicBool>,
    fail_deletes: Arc<AtomicBool>,
}

impl MockCacheService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Fail only `delete`, leaving reads and writes working
    pub fn set_delete_failing(&self, failing: bool) {
        self.fail_deletes.store(failing, Ordering::SeqCst);
    }

    /// Force `key` to be treated as expired
    pub fn expire(&self, key: &str) {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(key) {
            entry.1 = Some(Instant::now() - Duration::from_millis(1));
        }
    }

    /// Raw value, ignoring expiry
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone())
    }

    fn check_failure(&self) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Cache service error".to_string());
        }
        Ok(())
    }

    fn live(entry: &Entry) -> bool {
        entry.1.map_or(true, |deadline| Instant::now() < deadline)
    }
}

/// Matches `*` against any run of characters; every other character is literal
fn glob_matches(pattern: &str, candidate: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == candidate;
    }
    let mut rest = candidate;
    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            match rest.strip_prefix(part) {
                Some(tail) => rest = tail,
                None => return false,
            }
        } else if i == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
    }
    true
}

#[async_trait]
impl CacheServiceTrait for MockCacheService {
    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.check_failure()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), None));
        Ok(())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check_failure()?;
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Some(deadline)));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check_failure()?;
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if Self::live(entry) => Ok(Some(entry.0.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.check_failure()?;
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err("Cache delete error".to_string());
        }
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        Ok(self.get(key).await?.is_some())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>, String> {
        self.check_failure()?;
        let entries = self.entries.lock().unwrap();
        let mut keys: Vec<String> = entries
            .iter()
            .filter(|(k, entry)| Self::live(entry) && glob_matches(pattern, k))
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// One message captured by [`MockEmailService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

/// Mock email service recording every message instead of sending it
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Most recent code delivered to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == email)
            .map(|m| m.code.clone())
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_otp(&self, to: &str, code: &str, purpose: OtpPurpose) -> Result<(), String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Email service error".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            code: code.to_string(),
            purpose,
        });
        Ok(())
    }
}
