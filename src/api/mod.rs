//! API module
//!
//! Contains HTTP request handlers and the router for the books endpoints

pub mod books;
pub mod health;
pub mod middleware;

use crate::services::BookService;
use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Build the application router
///
/// Paths that match no route are served from `public_dir`. Every
/// request passes through the request-id middleware.
pub fn router<P: AsRef<Path>>(books: Arc<BookService>, public_dir: P) -> Router {
    Router::new()
        .route("/", get(health::welcome))
        .route("/api/health", get(health::health_check))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .with_state(books)
}
