//! Book persistence implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryBookRepository;
pub use postgres_repository::PostgresBookRepository;
