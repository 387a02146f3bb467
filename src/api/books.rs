//! Book record endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::book::{Book, BookFilter, BookId};
use crate::domain::DomainError;

/// Raw listing parameters; parsed into a [`BookFilter`] by the domain layer
#[derive(Debug, Default, Deserialize)]
pub struct ListBooksQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// Presence-only flag: `?desc` and `?desc=anything` both sort descending
    pub desc: Option<String>,
}

/// Body returned by a successful create
#[derive(Debug, Serialize)]
pub struct CreatedBook {
    pub id: String,
}

/// GET /book
pub async fn list_books(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter = BookFilter::from_params(
        query.limit.as_deref(),
        query.offset.as_deref(),
        query.sort_by.as_deref(),
        query.desc.is_some(),
    )
    .map_err(DomainError::from)?;

    let books = state.book_service.list(&filter).await?;
    debug!(count = books.len(), "Listed books");

    Ok(Json(books))
}

/// GET /book/{id}
pub async fn get_book(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Path(id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    state
        .book_service
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| book_not_found(&id))
}

/// POST /book
///
/// The server assigns the ID; an `id` in the payload is ignored.
pub async fn create_book(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Json(attributes): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let id = BookId::generate();
    let book = state.book_service.create(id.as_str(), &attributes).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedBook {
            id: book.id().to_string(),
        }),
    ))
}

/// PATCH /book/{id}
pub async fn update_book(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Path(id): Path<String>,
    Json(attributes): Json<Map<String, Value>>,
) -> Result<StatusCode, ApiError> {
    if state.book_service.get(&id).await?.is_none() {
        return Err(book_not_found(&id));
    }

    // Deleted between the existence check and the write
    match state.book_service.update(&id, &attributes).await? {
        0 => Err(book_not_found(&id)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

/// DELETE /book/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.book_service.delete(&id).await? {
        0 => Err(book_not_found(&id)),
        _ => Ok(StatusCode::NO_CONTENT),
    }
}

fn book_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Book '{}' not found", id))
}
