//! API key infrastructure
//!
//! Credential store implementations backing the authorization gate.

mod hasher;
mod in_memory;
mod postgres_repository;

pub use hasher::hash_key;
pub use in_memory::InMemoryApiKeyRepository;
pub use postgres_repository::PostgresApiKeyRepository;
