// src/adapters/memory.rs
use crate::{KvStore, WalletError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory key-value backend for tests and single-process embedding.
///
/// An optional byte quota caps the total stored size (keys plus values);
/// writes that would exceed it fail with `QuotaExceeded`, which is how
/// real backing stores behave when full.
#[derive(Clone)]
pub struct MemoryKv {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            quota_bytes: None,
        }
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn stored_bytes(entries: &HashMap<String, String>) -> usize {
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), WalletError> {
        let mut entries = self.entries.lock().unwrap();

        if let Some(quota) = self.quota_bytes {
            let replaced = entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let projected = Self::stored_bytes(&entries) - replaced + key.len() + value.len();
            if projected > quota {
                return Err(WalletError::QuotaExceeded);
            }
        }

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<(), WalletError> {
        let mut entries = self.entries.lock().unwrap();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}
