//! In-memory book repository

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::domain::book::{
    Book, BookChanges, BookFilter, BookId, BookRepository, NewBook, SortDirection, SortKey,
};
use crate::domain::DomainError;

/// Book store held in process memory.
///
/// `added_dttm` strictly increases across inserts, so the default order is
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored books
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        let mut books = self.books.read().await.clone();
        let key = filter.sort_key();

        // Direction applies to the sort key only; ties always go by ascending id
        books.sort_by(|a, b| {
            let primary = match filter.direction {
                SortDirection::Ascending => compare_by(key, a, b),
                SortDirection::Descending => compare_by(key, b, a),
            };
            primary.then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |l| l as usize);

        Ok(books.into_iter().skip(offset).take(limit).collect())
    }

    async fn get(&self, id: &BookId) -> Result<Option<Book>, DomainError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id() == id).cloned())
    }

    async fn create(&self, book: NewBook) -> Result<Book, DomainError> {
        let mut books = self.books.write().await;

        if books.iter().any(|b| b.id() == &book.id) {
            return Err(DomainError::storage(format!(
                "Book with ID '{}' already exists",
                book.id
            )));
        }

        let mut added_dttm = Utc::now();
        if let Some(last) = books.iter().map(Book::added_dttm).max() {
            if added_dttm <= last {
                added_dttm = last + Duration::microseconds(1);
            }
        }

        let stored = Book::from_new(book, added_dttm);
        books.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &BookId, changes: &BookChanges) -> Result<u64, DomainError> {
        let mut books = self.books.write().await;

        match books.iter_mut().find(|b| b.id() == id) {
            Some(book) => {
                book.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &BookId) -> Result<u64, DomainError> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id() != id);
        Ok((before - books.len()) as u64)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Ascending order for one key. Missing descriptions sort last, as NULLs do in PostgreSQL.
fn compare_by(key: SortKey, a: &Book, b: &Book) -> Ordering {
    match key {
        SortKey::Id => a.id().as_str().cmp(b.id().as_str()),
        SortKey::Author => a.author().cmp(b.author()),
        SortKey::Price => a.price().total_cmp(&b.price()),
        SortKey::Description => match (a.description(), b.description()) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::YearPublished => a.year_published().cmp(&b.year_published()),
        SortKey::AddedDttm => a.added_dttm().cmp(&b.added_dttm()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::FieldChange;

    fn new_book(id: &str, author: &str, price: f64) -> NewBook {
        NewBook {
            id: BookId::new(id).unwrap(),
            author: author.to_string(),
            price,
            description: None,
            year_published: 2000,
        }
    }

    async fn seeded() -> InMemoryBookRepository {
        let repo = InMemoryBookRepository::new();
        repo.create(new_book("b1", "Author B", 20.0)).await.unwrap();
        repo.create(new_book("b2", "Author A", 5.0)).await.unwrap();
        repo.create(new_book("b3", "Author C", 12.0)).await.unwrap();
        repo
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.id().as_str()).collect()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryBookRepository::new();
        let created = repo.create(new_book("b1", "A", 10.0)).await.unwrap();

        let fetched = repo.get(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = InMemoryBookRepository::new();
        repo.create(new_book("b1", "A", 10.0)).await.unwrap();

        assert!(repo.create(new_book("b1", "B", 1.0)).await.is_err());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_insertion_order_by_default() {
        let repo = seeded().await;
        let books = repo.list(&BookFilter::default()).await.unwrap();

        assert_eq!(ids(&books), vec!["b1", "b2", "b3"]);
    }

    #[tokio::test]
    async fn test_list_sorted_by_price() {
        let repo = seeded().await;

        let asc = repo
            .list(&BookFilter::default().sorted_by(SortKey::Price, SortDirection::Ascending))
            .await
            .unwrap();
        assert_eq!(ids(&asc), vec!["b2", "b3", "b1"]);

        let desc = repo
            .list(&BookFilter::default().sorted_by(SortKey::Price, SortDirection::Descending))
            .await
            .unwrap();
        assert_eq!(ids(&desc), vec!["b1", "b3", "b2"]);
    }

    #[tokio::test]
    async fn test_ties_break_by_ascending_id_in_both_directions() {
        let repo = InMemoryBookRepository::new();
        repo.create(new_book("t2", "Same", 7.0)).await.unwrap();
        repo.create(new_book("t1", "Same", 7.0)).await.unwrap();
        repo.create(new_book("t3", "Other", 1.0)).await.unwrap();

        let asc = repo
            .list(&BookFilter::default().sorted_by(SortKey::Price, SortDirection::Ascending))
            .await
            .unwrap();
        assert_eq!(ids(&asc), vec!["t3", "t1", "t2"]);

        let desc = repo
            .list(&BookFilter::default().sorted_by(SortKey::Price, SortDirection::Descending))
            .await
            .unwrap();
        assert_eq!(ids(&desc), vec!["t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn test_added_dttm_strictly_increases() {
        let repo = seeded().await;
        let books = repo.list(&BookFilter::default()).await.unwrap();

        assert!(books.windows(2).all(|w| w[0].added_dttm() < w[1].added_dttm()));
    }

    #[tokio::test]
    async fn test_list_window() {
        let repo = seeded().await;

        let page = repo
            .list(&BookFilter::default().with_limit(2).with_offset(1))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec!["b2", "b3"]);

        let none = repo.list(&BookFilter::default().with_limit(0)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_reports_affected_rows() {
        let repo = seeded().await;
        let changes = BookChanges::new(vec![FieldChange::Price(1.0)]).unwrap();

        let hit = repo.update(&BookId::new("b1").unwrap(), &changes).await.unwrap();
        let miss = repo.update(&BookId::new("zz").unwrap(), &changes).await.unwrap();

        assert_eq!(hit, 1);
        assert_eq!(miss, 0);
    }

    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let repo = seeded().await;
        let id = BookId::new("b2").unwrap();

        assert_eq!(repo.delete(&id).await.unwrap(), 1);
        assert_eq!(repo.delete(&id).await.unwrap(), 0);
        assert!(repo.get(&id).await.unwrap().is_none());
    }

    #[test]
    fn test_missing_description_sorts_last() {
        let mut with = new_book("a", "A", 1.0);
        with.description = Some("text".to_string());
        let with = Book::from_new(with, Utc::now());
        let without = Book::from_new(new_book("b", "B", 1.0), Utc::now());

        assert_eq!(compare_by(SortKey::Description, &with, &without), Ordering::Less);
    }
}
