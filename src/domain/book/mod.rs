//! Book domain
//!
//! Entity types, the field validation table, listing filters and the
//! repository port for book records.

mod entity;
mod filter;
mod repository;
mod validation;

pub use entity::{Book, BookChanges, BookId, FieldChange, NewBook};
pub use filter::{BookFilter, SortDirection, SortKey};
pub use repository::BookRepository;
#[cfg(test)]
pub use repository::MockBookRepository;
pub use validation::{
    is_mutable_field, retain_mutable, validate_book_id, validate_changes, validate_new_book,
    BookValidationError, FieldRule, BOOK_FIELD_RULES,
};

impl From<BookValidationError> for crate::domain::DomainError {
    fn from(err: BookValidationError) -> Self {
        match err {
            BookValidationError::EmptyId => Self::invalid_id(err.to_string()),
            other => Self::validation(other.to_string()),
        }
    }
}
