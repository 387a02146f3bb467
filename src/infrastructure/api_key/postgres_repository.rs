//! PostgreSQL API key lookup

use async_trait::async_trait;
use sqlx::PgPool;

use super::hasher::hash_key;
use crate::domain::api_key::{ApiKeyCheck, ApiKeyRepository};
use crate::domain::DomainError;

/// Looks presented keys up in the `api_key` table by their hash
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn check(&self, key: &str) -> Result<ApiKeyCheck, DomainError> {
        let active: Option<bool> =
            sqlx::query_scalar("SELECT active FROM api_key WHERE key_hash = $1")
                .bind(hash_key(key))
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to look up API key: {}", e)))?;

        Ok(ApiKeyCheck::from(active))
    }
}
