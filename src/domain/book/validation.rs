//! Book validation rules
//!
//! Field rules live in a single table, [`BOOK_FIELD_RULES`], which is walked in
//! order for both inserts and partial updates. The first violated rule wins.

use serde_json::{Map, Value};
use thiserror::Error;

use super::entity::{BookChanges, BookId, FieldChange, NewBook};

/// Errors that can occur during book validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookValidationError {
    #[error("id must be a non-empty string")]
    EmptyId,

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("{0} must be greater than or equal to 0")]
    Negative(&'static str),

    #[error("{0} must be an integer")]
    NotAnInteger(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    #[error("No updatable attributes provided. Allowed attributes: author, price, description, year_published")]
    NoUpdatableFields,

    #[error("{0} must be a non-negative integer")]
    InvalidPagination(&'static str),

    #[error("sortBy must be one of: id, author, price, description, year_published, added_dttm (got '{0}')")]
    InvalidSortKey(String),
}

/// Parses one attribute value into a validated change
pub type FieldParser = fn(&Value) -> Result<FieldChange, BookValidationError>;

/// Declarative rule for a single book attribute
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    parse: FieldParser,
}

impl FieldRule {
    pub fn parse(&self, value: &Value) -> Result<FieldChange, BookValidationError> {
        (self.parse)(value)
    }
}

/// Every attribute a client may set. This is also the allow-list for updates:
/// `id` and `added_dttm` are deliberately absent.
pub const BOOK_FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        name: "author",
        required: true,
        parse: parse_author,
    },
    FieldRule {
        name: "price",
        required: true,
        parse: parse_price,
    },
    FieldRule {
        name: "description",
        required: false,
        parse: parse_description,
    },
    FieldRule {
        name: "year_published",
        required: true,
        parse: parse_year_published,
    },
];

/// Validate a book ID
pub fn validate_book_id(id: &str) -> Result<(), BookValidationError> {
    if id.trim().is_empty() {
        return Err(BookValidationError::EmptyId);
    }
    Ok(())
}

/// Whether `name` is an attribute clients are allowed to change
pub fn is_mutable_field(name: &str) -> bool {
    BOOK_FIELD_RULES.iter().any(|rule| rule.name == name)
}

/// Drop every attribute that is not on the mutable allow-list
pub fn retain_mutable(attributes: &Map<String, Value>) -> Map<String, Value> {
    attributes
        .iter()
        .filter(|(name, _)| is_mutable_field(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Validate a full insert payload. Unknown attributes are ignored.
///
/// A `null` value counts as absent, so a required attribute sent as `null`
/// fails with [`BookValidationError::Missing`].
pub fn validate_new_book(
    id: BookId,
    attributes: &Map<String, Value>,
) -> Result<NewBook, BookValidationError> {
    let mut author = None;
    let mut price = None;
    let mut description = None;
    let mut year_published = None;

    for rule in BOOK_FIELD_RULES {
        let change = match attributes.get(rule.name).filter(|v| !v.is_null()) {
            Some(value) => rule.parse(value)?,
            None if rule.required => return Err(BookValidationError::Missing(rule.name)),
            None => continue,
        };

        match change {
            FieldChange::Author(value) => author = Some(value),
            FieldChange::Price(value) => price = Some(value),
            FieldChange::Description(value) => description = value,
            FieldChange::YearPublished(value) => year_published = Some(value),
        }
    }

    Ok(NewBook {
        id,
        author: author.ok_or(BookValidationError::Missing("author"))?,
        price: price.ok_or(BookValidationError::Missing("price"))?,
        description,
        year_published: year_published.ok_or(BookValidationError::Missing("year_published"))?,
    })
}

/// Validate a partial update payload.
///
/// Only attributes that are both present and on the allow-list are checked.
/// Fails with [`BookValidationError::NoUpdatableFields`] when none remain.
pub fn validate_changes(attributes: &Map<String, Value>) -> Result<BookChanges, BookValidationError> {
    let mut changes = Vec::new();

    for rule in BOOK_FIELD_RULES {
        if let Some(value) = attributes.get(rule.name) {
            changes.push(rule.parse(value)?);
        }
    }

    BookChanges::new(changes)
}

fn parse_author(value: &Value) -> Result<FieldChange, BookValidationError> {
    let author = value
        .as_str()
        .ok_or(BookValidationError::NotAString("author"))?;

    if author.is_empty() {
        return Err(BookValidationError::EmptyAuthor);
    }

    Ok(FieldChange::Author(author.to_string()))
}

fn parse_price(value: &Value) -> Result<FieldChange, BookValidationError> {
    let price = value
        .as_f64()
        .ok_or(BookValidationError::NotANumber("price"))?;

    if price < 0.0 {
        return Err(BookValidationError::Negative("price"));
    }

    Ok(FieldChange::Price(price))
}

fn parse_description(value: &Value) -> Result<FieldChange, BookValidationError> {
    match value {
        Value::Null => Ok(FieldChange::Description(None)),
        Value::String(text) => Ok(FieldChange::Description(Some(text.clone()))),
        _ => Err(BookValidationError::NotAString("description")),
    }
}

fn parse_year_published(value: &Value) -> Result<FieldChange, BookValidationError> {
    let year = value
        .as_f64()
        .ok_or(BookValidationError::NotANumber("year_published"))?;

    if year < 0.0 {
        return Err(BookValidationError::Negative("year_published"));
    }

    if year.fract() != 0.0 {
        return Err(BookValidationError::NotAnInteger("year_published"));
    }

    if year > f64::from(i32::MAX) {
        return Err(BookValidationError::OutOfRange("year_published"));
    }

    Ok(FieldChange::YearPublished(year as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test attributes must be an object"),
        }
    }

    fn id() -> BookId {
        BookId::new("test-book").unwrap()
    }

    #[test]
    fn test_valid_new_book() {
        let book = validate_new_book(
            id(),
            &attrs(json!({
                "author": "Testing author",
                "price": 12,
                "description": "Testing description",
                "year_published": 2000
            })),
        )
        .unwrap();

        assert_eq!(book.author, "Testing author");
        assert_eq!(book.price, 12.0);
        assert_eq!(book.description.as_deref(), Some("Testing description"));
        assert_eq!(book.year_published, 2000);
    }

    #[test]
    fn test_description_is_optional() {
        let book = validate_new_book(
            id(),
            &attrs(json!({"author": "A", "price": 0, "year_published": 0})),
        )
        .unwrap();

        assert!(book.description.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        assert_eq!(
            validate_new_book(id(), &attrs(json!({"price": 1, "year_published": 1}))),
            Err(BookValidationError::Missing("author"))
        );
        assert_eq!(
            validate_new_book(id(), &attrs(json!({"author": "A", "year_published": 2000}))),
            Err(BookValidationError::Missing("price"))
        );
        assert_eq!(
            validate_new_book(id(), &attrs(json!({"author": "A", "price": 1}))),
            Err(BookValidationError::Missing("year_published"))
        );
        assert_eq!(
            validate_new_book(
                id(),
                &attrs(json!({"author": null, "price": 1, "year_published": 1}))
            ),
            Err(BookValidationError::Missing("author"))
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let result = validate_new_book(
            id(),
            &attrs(json!({"author": "", "price": -1, "year_published": -1})),
        );
        assert_eq!(result, Err(BookValidationError::EmptyAuthor));
    }

    #[test]
    fn test_field_rules() {
        let cases = [
            (json!({"author": 42}), BookValidationError::NotAString("author")),
            (json!({"author": ""}), BookValidationError::EmptyAuthor),
            (json!({"price": "10"}), BookValidationError::NotANumber("price")),
            (json!({"price": -0.01}), BookValidationError::Negative("price")),
            (json!({"description": 7}), BookValidationError::NotAString("description")),
            (json!({"description": ["x"]}), BookValidationError::NotAString("description")),
            (json!({"year_published": "2000"}), BookValidationError::NotANumber("year_published")),
            (json!({"year_published": -5}), BookValidationError::Negative("year_published")),
            (json!({"year_published": 1999.5}), BookValidationError::NotAnInteger("year_published")),
            (
                json!({"year_published": 3_000_000_000_u64}),
                BookValidationError::OutOfRange("year_published"),
            ),
        ];

        for (payload, expected) in cases {
            assert_eq!(validate_changes(&attrs(payload.clone())), Err(expected), "{payload}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(BookValidationError::Missing("price").to_string(), "price is required");
        assert_eq!(
            BookValidationError::Negative("price").to_string(),
            "price must be greater than or equal to 0"
        );
        assert_eq!(BookValidationError::EmptyAuthor.to_string(), "author must not be empty");
    }

    #[test]
    fn test_changes_only_cover_present_fields() {
        let changes = validate_changes(&attrs(json!({"price": 15, "weirdField": "x"}))).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes.columns(), vec!["price"]);
    }

    #[test]
    fn test_changes_follow_table_order() {
        let changes = validate_changes(&attrs(json!({
            "year_published": 1990,
            "author": "B",
            "description": null
        })))
        .unwrap();

        assert_eq!(changes.columns(), vec!["author", "description", "year_published"]);
    }

    #[test]
    fn test_empty_changes_rejected() {
        assert_eq!(
            validate_changes(&Map::new()),
            Err(BookValidationError::NoUpdatableFields)
        );
        assert_eq!(
            validate_changes(&attrs(json!({"weirdField": 1}))),
            Err(BookValidationError::NoUpdatableFields)
        );
    }

    #[test]
    fn test_immutable_fields_are_not_mutable() {
        assert!(!is_mutable_field("id"));
        assert!(!is_mutable_field("added_dttm"));
        assert!(is_mutable_field("author"));

        let kept = retain_mutable(&attrs(json!({
            "id": "other",
            "added_dttm": "2020-01-01T00:00:00Z",
            "price": 3
        })));
        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key("price"));
    }
}
