//! API key lookup trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::check::ApiKeyCheck;
use crate::domain::DomainError;

/// Credential store consulted by the authorization gate
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Look up a presented key exactly as the client sent it
    async fn check(&self, key: &str) -> Result<ApiKeyCheck, DomainError>;
}
