//! Book repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Book, BookChanges, BookId, NewBook};
use super::filter::BookFilter;
use crate::domain::DomainError;

/// Persistence port for books.
///
/// Implementations receive already-validated input and run exactly one
/// statement per call. A missing row is never an error: `get` returns `None`
/// and `update`/`delete` report zero affected rows.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// List books matching the filter, in the filter's order
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError>;

    /// Get a book by its ID
    async fn get(&self, id: &BookId) -> Result<Option<Book>, DomainError>;

    /// Insert a new book; the store assigns `added_dttm`
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Apply changes to the book with the given ID, returning rows affected
    async fn update(&self, id: &BookId, changes: &BookChanges) -> Result<u64, DomainError>;

    /// Delete the book with the given ID, returning rows affected
    async fn delete(&self, id: &BookId) -> Result<u64, DomainError>;

    /// Cheap round-trip used by readiness checks
    async fn ping(&self) -> Result<(), DomainError>;
}
