//! PostgreSQL book repository implementation
//!
//! Every value reaches the database through a bind placeholder. The only text
//! spliced into statements comes from fixed identifiers: the table name, the
//! columns named by [`FieldChange::column`] and [`SortKey::column`], and the
//! sort direction keyword.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::domain::book::{
    Book, BookChanges, BookFilter, BookId, BookRepository, FieldChange, NewBook,
};
use crate::domain::DomainError;

// `added_dttm` may be `timestamp` or `timestamptz`; it is always decoded as `timestamptz`
const SELECT_BOOK: &str = concat!(
    "SELECT id, author, price::float8 AS price, description, year_published, ",
    "added_dttm::timestamptz AS added_dttm FROM book"
);
const RETURNING_BOOK: &str = concat!(
    " RETURNING id, author, price::float8 AS price, description, year_published, ",
    "added_dttm::timestamptz AS added_dttm"
);

/// PostgreSQL implementation of BookRepository
#[derive(Debug, Clone)]
pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        let rows = build_list_query(filter)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list books: {}", e)))?;

        rows.iter().map(row_to_book).collect()
    }

    async fn get(&self, id: &BookId) -> Result<Option<Book>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_BOOK))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get book: {}", e)))?;

        row.as_ref().map(row_to_book).transpose()
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        // Dropping the transaction on a decode failure rolls the insert back
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let row = sqlx::query(&format!(
            "INSERT INTO book (id, author, price, description, year_published) \
             VALUES ($1, $2, $3::numeric, $4, $5){}",
            RETURNING_BOOK
        ))
        .bind(book.id.as_str())
        .bind(&book.author)
        .bind(book.price)
        .bind(book.description.as_deref())
        .bind(book.year_published)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create book: {}", e)))?;

        let created = row_to_book(&row)?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit book: {}", e)))?;

        Ok(created)
    }

    async fn update(&self, id: &BookId, changes: &BookChanges) -> Result<u64, DomainError> {
        let result = build_update_query(id, changes)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update book: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &BookId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete book: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))?;

        Ok(())
    }
}

fn build_list_query(filter: &BookFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_BOOK);

    builder
        .push(" ORDER BY ")
        .push(filter.sort_key().column())
        .push(" ")
        .push(filter.direction.keyword())
        .push(", id");

    if let Some(limit) = filter.limit {
        builder.push(" LIMIT ").push_bind(i64::from(limit));
    }

    if let Some(offset) = filter.offset {
        builder.push(" OFFSET ").push_bind(i64::from(offset));
    }

    builder
}

fn build_update_query(id: &BookId, changes: &BookChanges) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE book SET ");
    let mut assignments = builder.separated(", ");

    for change in changes.iter() {
        assignments.push(change.column());
        assignments.push_unseparated(" = ");

        match change {
            FieldChange::Author(author) => {
                assignments.push_bind_unseparated(author.clone());
            }
            FieldChange::Price(price) => {
                assignments
                    .push_bind_unseparated(*price)
                    .push_unseparated("::numeric");
            }
            FieldChange::Description(description) => {
                assignments.push_bind_unseparated(description.clone());
            }
            FieldChange::YearPublished(year) => {
                assignments.push_bind_unseparated(*year);
            }
        }
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id.as_str().to_string());

    builder
}

fn row_to_book(row: &PgRow) -> Result<Book, DomainError> {
    let column_error =
        |e: sqlx::Error| DomainError::storage(format!("Failed to read book row: {}", e));

    let id: String = row.try_get("id").map_err(column_error)?;
    let added_dttm: DateTime<Utc> = row.try_get("added_dttm").map_err(column_error)?;

    let book = NewBook {
        id: BookId::new(&id)
            .map_err(|e| DomainError::storage(format!("Invalid book ID in database: {}", e)))?,
        author: row.try_get("author").map_err(column_error)?,
        price: row.try_get("price").map_err(column_error)?,
        description: row.try_get("description").map_err(column_error)?,
        year_published: row.try_get("year_published").map_err(column_error)?,
    };

    Ok(Book::from_new(book, added_dttm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{validate_changes, SortDirection, SortKey};
    use serde_json::json;

    fn changes(value: serde_json::Value) -> BookChanges {
        validate_changes(value.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_update_binds_every_value() {
        let id = BookId::new("abc").unwrap();
        let builder = build_update_query(&id, &changes(json!({"author": "B", "price": 3})));

        assert_eq!(
            builder.sql(),
            "UPDATE book SET author = $1, price = $2::numeric WHERE id = $3"
        );
    }

    #[test]
    fn test_update_single_column() {
        let id = BookId::new("abc").unwrap();
        let builder = build_update_query(&id, &changes(json!({"description": null})));

        assert_eq!(builder.sql(), "UPDATE book SET description = $1 WHERE id = $2");
    }

    #[test]
    fn test_update_never_includes_payload_text() {
        let id = BookId::new("abc'; DROP TABLE book; --").unwrap();
        let builder = build_update_query(
            &id,
            &changes(json!({"author": "Robert'); DROP TABLE book; --"})),
        );

        assert!(!builder.sql().contains("DROP"));
    }

    #[test]
    fn test_added_dttm_read_as_timestamptz() {
        let projection = "added_dttm::timestamptz AS added_dttm";

        assert!(SELECT_BOOK.contains(projection));
        assert!(RETURNING_BOOK.contains(projection));
    }

    #[test]
    fn test_default_list_query() {
        let builder = build_list_query(&BookFilter::default());

        assert_eq!(
            builder.sql(),
            format!("{} ORDER BY added_dttm ASC, id", SELECT_BOOK)
        );
    }

    #[test]
    fn test_list_query_with_window_and_sort() {
        let filter = BookFilter::default()
            .sorted_by(SortKey::Price, SortDirection::Descending)
            .with_limit(5)
            .with_offset(10);
        let builder = build_list_query(&filter);

        assert_eq!(
            builder.sql(),
            format!("{} ORDER BY price DESC, id LIMIT $1 OFFSET $2", SELECT_BOOK)
        );
    }

    const CREATE_BOOK_TABLE: &str = "CREATE TABLE IF NOT EXISTS book (
        id text PRIMARY KEY,
        author text NOT NULL,
        price numeric NOT NULL,
        description text NULL,
        year_published integer NOT NULL,
        added_dttm timestamp NOT NULL DEFAULT now()
    )";

    /// Runs only when `DATABASE_URL` points at a disposable database
    async fn database_repository() -> Option<PostgresBookRepository> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::query(CREATE_BOOK_TABLE).execute(&pool).await.unwrap();

        Some(PostgresBookRepository::new(pool))
    }

    #[tokio::test]
    async fn test_round_trip_against_database() {
        let Some(repo) = database_repository().await else {
            return;
        };
        let id = BookId::generate();

        let created = repo
            .create(NewBook {
                id: id.clone(),
                author: "Round Trip".to_string(),
                price: 12.5,
                description: None,
                year_published: 2001,
            })
            .await
            .unwrap();
        assert_eq!(created.price(), 12.5);

        let fetched = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let affected = repo
            .update(&id, &changes(json!({"price": 3, "description": "described"})))
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let updated = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(updated.price(), 3.0);
        assert_eq!(updated.description(), Some("described"));
        assert_eq!(updated.added_dttm(), created.added_dttm());

        let listed = repo
            .list(&BookFilter::default().sorted_by(SortKey::AddedDttm, SortDirection::Descending))
            .await
            .unwrap();
        assert!(listed.iter().any(|b| b.id() == &id));

        assert_eq!(repo.delete(&id).await.unwrap(), 1);
        assert!(repo.get(&id).await.unwrap().is_none());
        assert_eq!(repo.delete(&id).await.unwrap(), 0);
    }
}
