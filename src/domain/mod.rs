//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod book;
pub mod error;

pub use api_key::{ApiKeyCheck, ApiKeyRepository, GateDecision, GateRejection};
pub use book::{
    Book, BookChanges, BookFilter, BookId, BookRepository, BookValidationError, NewBook,
    SortDirection, SortKey,
};
pub use error::DomainError;
