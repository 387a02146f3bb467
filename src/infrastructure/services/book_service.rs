//! Book service - validated CRUD operations for book records

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::book::{
    retain_mutable, validate_changes, validate_new_book, Book, BookFilter, BookId, BookRepository,
};
use crate::domain::DomainError;

/// Book service: runs the validation table, then hands typed input to the repository
#[derive(Debug)]
pub struct BookService<R: BookRepository> {
    repository: Arc<R>,
}

impl<R: BookRepository> BookService<R> {
    /// Create a new BookService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List books matching the filter
    pub async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        debug!(?filter, "Listing books");
        self.repository.list(filter).await
    }

    /// Get a book by ID; `Ok(None)` when no such book exists
    pub async fn get(&self, id: &str) -> Result<Option<Book>, DomainError> {
        let book_id = BookId::new(id)?;
        self.repository.get(&book_id).await
    }

    /// Validate and insert a new book under the given ID
    pub async fn create(
        &self,
        id: &str,
        attributes: &Map<String, Value>,
    ) -> Result<Book, DomainError> {
        let book_id = BookId::new(id)?;
        let new_book = validate_new_book(book_id, attributes)?;

        let created = self.repository.create(new_book).await?;
        info!(id = %created.id(), "Book created");

        Ok(created)
    }

    /// Apply a partial update, returning the number of rows affected.
    ///
    /// Attributes outside the mutable allow-list are dropped before validation;
    /// an update that is left with nothing to change is rejected without
    /// touching the repository.
    pub async fn update(
        &self,
        id: &str,
        attributes: &Map<String, Value>,
    ) -> Result<u64, DomainError> {
        let book_id = BookId::new(id)?;
        let changes = validate_changes(&retain_mutable(attributes))?;

        let affected = self.repository.update(&book_id, &changes).await?;
        info!(id = %book_id, columns = ?changes.columns(), affected, "Book updated");

        Ok(affected)
    }

    /// Delete a book, returning the number of rows affected
    pub async fn delete(&self, id: &str) -> Result<u64, DomainError> {
        let book_id = BookId::new(id)?;

        let affected = self.repository.delete(&book_id).await?;
        info!(id = %book_id, affected, "Book deleted");

        Ok(affected)
    }

    /// Check that the underlying store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
