//! Book API handlers
//!
//! Contains HTTP request handlers for book CRUD operations.

use crate::error::AppError;
use crate::services::BookService;
use crate::state::{Book, BookFields};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

/// Message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok")
    pub status: String,
}

impl MessageResponse {
    fn ok(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status: "ok".to_string(),
        }
    }
}

/// GET /books - List all books
pub async fn list_books(
    State(books): State<Arc<BookService>>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(books.list().await?))
}

/// GET /books/:id - Get a specific book
///
/// An absent book is not an error: the body is `null`.
pub async fn get_book(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Book>>, AppError> {
    Ok(Json(books.get(&id).await?))
}

/// POST /books - Create a new book
pub async fn create_book(
    State(books): State<Arc<BookService>>,
    Json(payload): Json<BookFields>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = books.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /books/:id - Update a book
pub async fn update_book(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
    Json(payload): Json<BookFields>,
) -> Result<Json<MessageResponse>, AppError> {
    books.update(&id, payload).await?;
    Ok(Json(MessageResponse::ok("Book updated")))
}

/// DELETE /books/:id - Delete a book
pub async fn delete_book(
    State(books): State<Arc<BookService>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    books.delete(&id).await?;
    Ok(Json(MessageResponse::ok("Book deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::JsonFileStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_state(dir: &TempDir, contents: &str) -> Arc<BookService> {
        let path = dir.path().join("db.json");
        std::fs::write(&path, contents).unwrap();
        Arc::new(BookService::new(Arc::new(JsonFileStore::new(path))))
    }

    #[tokio::test]
    async fn test_list_books_empty() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir, r#"{"books": []}"#);

        let response = list_books(State(state)).await.unwrap();
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_create_book() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir, r#"{"books": []}"#);

        let payload = json!({"title": "Dune"}).as_object().cloned().unwrap();
        let (status, response) = create_book(State(state.clone()), Json(payload))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.id, 1);

        let list_response = list_books(State(state)).await.unwrap();
        assert_eq!(list_response.len(), 1);
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir, r#"{"books": []}"#);

        let response = get_book(State(state), Path("42".to_string())).await.unwrap();
        assert!(response.0.is_none());
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir, r#"{"books": []}"#);

        let result = update_book(State(state), Path("1".to_string()), Json(BookFields::new())).await;
        match result {
            Err(AppError::BookNotFound(_)) => {}
            other => panic!("Expected BookNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_book_invalid_id() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir, r#"{"books": []}"#);

        let result = delete_book(State(state), Path("abc".to_string())).await;
        assert!(matches!(result, Err(AppError::InvalidId(_))));
    }
}
