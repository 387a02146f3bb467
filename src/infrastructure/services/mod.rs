//! Infrastructure services

mod book_service;

pub use book_service::BookService;
