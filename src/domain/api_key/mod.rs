//! API Key domain
//!
//! Types and the request gate for API-key based authorization.

mod check;
pub mod gate;
mod repository;

pub use check::ApiKeyCheck;
pub use gate::{authorize, extract_key, GateDecision, GateRejection};
pub use repository::ApiKeyRepository;
#[cfg(test)]
pub use repository::MockApiKeyRepository;
