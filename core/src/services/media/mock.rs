use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::MediaStorage;

/// Records writes in memory
#[derive(Clone, Default)]
pub struct MockMediaStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }
}

#[async_trait]
impl MediaStorage for MockMediaStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), bytes.to_vec());
        Ok(())
    }
}
