//! Book Records API
//!
//! Validated create/read/update/delete over a relational `book` table, with
//! every request gated by an API key looked up in the same store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use api::state::AppState;
use config::StorageBackend;
use domain::DomainError;
use infrastructure::{
    api_key::{InMemoryApiKeyRepository, PostgresApiKeyRepository},
    book::{InMemoryBookRepository, PostgresBookRepository},
};

/// Create the application state for the configured storage backend
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!(backend = ?config.storage.backend, "Storage backend");

    match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = require_database_url(config.storage.resolve_database_url())?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .connect(&database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            Ok(AppState::from_repositories(
                Arc::new(PostgresBookRepository::new(pool.clone())),
                Arc::new(PostgresApiKeyRepository::new(pool)),
            ))
        }
        StorageBackend::Memory => {
            if config.auth.api_keys.is_empty() {
                warn!("In-memory backend has no API keys configured; every request will be rejected");
            }

            Ok(AppState::from_repositories(
                Arc::new(InMemoryBookRepository::new()),
                Arc::new(InMemoryApiKeyRepository::with_active_keys(
                    &config.auth.api_keys,
                )),
            ))
        }
    }
}

fn require_database_url(url: Option<String>) -> Result<String, DomainError> {
    url.ok_or_else(|| {
        DomainError::configuration(
            "storage.database_url or DATABASE_URL is required for the postgres backend",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_accepts_configured_keys() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.auth.api_keys = vec!["local-key".to_string()];

        let state = create_app_state_with_config(&config).await.unwrap();

        assert!(state.api_keys.check("local-key").await.unwrap().is_valid());
        assert!(state.book_service.ping().await.is_ok());
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let err = require_database_url(None).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let url = require_database_url(Some("postgres://localhost/books".to_string()));
        assert_eq!(url.unwrap(), "postgres://localhost/books");
    }
}
