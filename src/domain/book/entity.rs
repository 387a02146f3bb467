//! Book entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{validate_book_id, BookValidationError};

/// Book identifier - opaque non-empty string, generated as a UUID v4 on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct BookId(String);

impl BookId {
    /// Create a new BookId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, BookValidationError> {
        let id = id.into();
        validate_book_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single validated change to one mutable book attribute
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Author(String),
    Price(f64),
    /// `None` clears the description
    Description(Option<String>),
    YearPublished(i32),
}

impl FieldChange {
    /// Column that this change writes to
    pub fn column(&self) -> &'static str {
        match self {
            Self::Author(_) => "author",
            Self::Price(_) => "price",
            Self::Description(_) => "description",
            Self::YearPublished(_) => "year_published",
        }
    }
}

/// Validated, non-empty set of attribute changes for a partial update
#[derive(Debug, Clone, PartialEq)]
pub struct BookChanges(Vec<FieldChange>);

impl BookChanges {
    pub(crate) fn new(changes: Vec<FieldChange>) -> Result<Self, BookValidationError> {
        if changes.is_empty() {
            return Err(BookValidationError::NoUpdatableFields);
        }
        Ok(Self(changes))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the columns touched by these changes, in application order
    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(FieldChange::column).collect()
    }
}

/// A fully validated book ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub id: BookId,
    pub author: String,
    pub price: f64,
    pub description: Option<String>,
    pub year_published: i32,
}

/// Book entity as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    id: BookId,
    author: String,
    price: f64,
    description: Option<String>,
    year_published: i32,
    added_dttm: DateTime<Utc>,
}

impl Book {
    /// Materialize a stored book from a validated insert and its creation timestamp
    pub fn from_new(book: NewBook, added_dttm: DateTime<Utc>) -> Self {
        Self {
            id: book.id,
            author: book.author,
            price: book.price,
            description: book.description,
            year_published: book.year_published,
            added_dttm,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn year_published(&self) -> i32 {
        self.year_published
    }

    pub fn added_dttm(&self) -> DateTime<Utc> {
        self.added_dttm
    }

    /// Apply validated changes in place. `id` and `added_dttm` are never touched.
    pub fn apply(&mut self, changes: &BookChanges) {
        for change in changes.iter() {
            match change {
                FieldChange::Author(author) => self.author = author.clone(),
                FieldChange::Price(price) => self.price = *price,
                FieldChange::Description(description) => self.description = description.clone(),
                FieldChange::YearPublished(year) => self.year_published = *year,
            }
        }
    }
}
