//! Infrastructure layer - External service implementations

pub mod api_key;
pub mod book;
pub mod logging;
pub mod services;
