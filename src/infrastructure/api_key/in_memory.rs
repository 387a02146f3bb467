//! In-memory API key lookup

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::hasher::hash_key;
use crate::domain::api_key::{ApiKeyCheck, ApiKeyRepository};
use crate::domain::DomainError;

/// Credential store held in process memory, keyed by key hash
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: RwLock<HashMap<String, bool>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store where every given key is active
    pub fn with_active_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| (hash_key(key.as_ref()), true))
            .collect();

        Self {
            keys: RwLock::new(keys),
        }
    }

    /// Register a key, or change whether an existing one is active
    pub async fn insert(&self, key: &str, active: bool) {
        self.keys.write().await.insert(hash_key(key), active);
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn check(&self, key: &str) -> Result<ApiKeyCheck, DomainError> {
        let keys = self.keys.read().await;
        Ok(ApiKeyCheck::from(keys.get(&hash_key(key)).copied()))
    }
}
