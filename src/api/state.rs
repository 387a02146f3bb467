//! Application state for shared services

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::api_key::ApiKeyRepository;
use crate::domain::book::{Book, BookFilter, BookRepository};
use crate::domain::DomainError;
use crate::infrastructure::services::BookService;

/// Application state handed to every handler; holds no globals
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<dyn BookServiceTrait>,
    pub api_keys: Arc<dyn ApiKeyRepository>,
}

/// Trait for book service operations
#[async_trait::async_trait]
pub trait BookServiceTrait: Send + Sync {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Book>, DomainError>;
    async fn create(&self, id: &str, attributes: &Map<String, Value>) -> Result<Book, DomainError>;
    async fn update(&self, id: &str, attributes: &Map<String, Value>) -> Result<u64, DomainError>;
    async fn delete(&self, id: &str) -> Result<u64, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: BookRepository + 'static> BookServiceTrait for BookService<R> {
    async fn list(&self, filter: &BookFilter) -> Result<Vec<Book>, DomainError> {
        BookService::list(self, filter).await
    }

    async fn get(&self, id: &str) -> Result<Option<Book>, DomainError> {
        BookService::get(self, id).await
    }

    async fn create(&self, id: &str, attributes: &Map<String, Value>) -> Result<Book, DomainError> {
        BookService::create(self, id, attributes).await
    }

    async fn update(&self, id: &str, attributes: &Map<String, Value>) -> Result<u64, DomainError> {
        BookService::update(self, id, attributes).await
    }

    async fn delete(&self, id: &str) -> Result<u64, DomainError> {
        BookService::delete(self, id).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        BookService::ping(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        book_service: Arc<dyn BookServiceTrait>,
        api_keys: Arc<dyn ApiKeyRepository>,
    ) -> Self {
        Self {
            book_service,
            api_keys,
        }
    }

    /// Wire a book repository and credential store into state
    pub fn from_repositories<R>(books: Arc<R>, api_keys: Arc<dyn ApiKeyRepository>) -> Self
    where
        R: BookRepository + 'static,
    {
        Self::new(Arc::new(BookService::new(books)), api_keys)
    }
}
