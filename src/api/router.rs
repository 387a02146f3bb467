use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use super::books;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Probes (no auth)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/book", get(books::list_books).post(books::create_book))
        .route(
            "/book/{id}",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
