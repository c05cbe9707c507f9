//! Book service
//!
//! Implements list, get, create, update and delete over the persisted
//! collection. Every operation loads the container fresh from the store;
//! mutating operations write the whole container back.

use crate::error::AppError;
use crate::state::{parse_book_id, Book, BookFields, BookId, BookStore, Container, StoreError};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// How ids are assigned to newly created books
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdStrategy {
    /// `collection length + 1`; may re-mint an id after a delete
    #[default]
    Length,
    /// `largest existing id + 1`; never reuses a deleted id
    NextMax,
}

impl IdStrategy {
    /// Compute the id for the next book appended to `books`
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn next_id(&self, books: &[Book]) -> Option<BookId> {
        let last = match self {
            IdStrategy::Length => BookId::try_from(books.len()).ok()?,
            IdStrategy::NextMax => books.iter().map(|b| b.id).max().unwrap_or(0).max(0),
        };
        last.checked_add(1)
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(IdStrategy::Length),
            "next-max" | "next_max" | "max" => Ok(IdStrategy::NextMax),
            other => Err(format!("unknown id strategy: {}", other)),
        }
    }
}

/// What happens when writing the container back fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Log the failure and report success to the caller
    #[default]
    Lenient,
    /// Report the failure to the caller
    Strict,
}

/// CRUD operations over the book collection
///
/// A single lock serializes every load-mutate-save cycle, so concurrent
/// requests never race on id assignment or on the final write.
pub struct BookService {
    store: Arc<dyn BookStore>,
    id_strategy: IdStrategy,
    write_policy: WritePolicy,
    lock: Mutex<()>,
}

impl BookService {
    /// Create a service with the default id strategy and write policy
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self::with_policies(store, IdStrategy::default(), WritePolicy::default())
    }

    /// Create a service with explicit id strategy and write policy
    pub fn with_policies(
        store: Arc<dyn BookStore>,
        id_strategy: IdStrategy,
        write_policy: WritePolicy,
    ) -> Self {
        Self {
            store,
            id_strategy,
            write_policy,
            lock: Mutex::new(()),
        }
    }

    /// Return every book in insertion order
    pub async fn list(&self) -> Result<Vec<Book>, AppError> {
        let _guard = self.lock.lock().await;
        let container = self.store.load()?;
        Ok(container.books)
    }

    /// Look up a single book
    ///
    /// A malformed id never matches, so it yields `Ok(None)` like any other
    /// absent book.
    pub async fn get(&self, raw_id: &str) -> Result<Option<Book>, AppError> {
        let _guard = self.lock.lock().await;
        let container = self.store.load()?;
        Ok(parse_book_id(raw_id).and_then(|id| container.find(id).cloned()))
    }

    /// Append a new book built from `payload`
    ///
    /// Any `id` in the payload is replaced by the computed one.
    pub async fn create(&self, payload: BookFields) -> Result<Book, AppError> {
        let _guard = self.lock.lock().await;
        let mut container = self.store.load()?;

        let id = self
            .id_strategy
            .next_id(&container.books)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("id space exhausted")))?;
        let book = Book::new(id, payload);
        container.books.push(book.clone());
        self.commit(&container)?;

        info!(book_id = id, "Book created");
        Ok(book)
    }

    /// Overlay `payload` onto an existing book, keeping its id
    ///
    /// A missing book is `BookNotFound`, reported as 404 like delete (not 204).
    pub async fn update(&self, raw_id: &str, payload: BookFields) -> Result<Book, AppError> {
        let _guard = self.lock.lock().await;
        let mut container = self.store.load()?;

        let book = parse_book_id(raw_id)
            .and_then(|id| container.books.iter_mut().find(|b| b.id == id))
            .ok_or_else(|| AppError::BookNotFound(raw_id.to_string()))?;
        book.merge(payload);
        let updated = book.clone();
        self.commit(&container)?;

        info!(book_id = updated.id, "Book updated");
        Ok(updated)
    }

    /// Remove exactly one book
    ///
    /// The id is validated before the store is touched. Store failures are
    /// logged and reported without detail.
    pub async fn delete(&self, raw_id: &str) -> Result<Book, AppError> {
        let id = parse_book_id(raw_id).ok_or_else(|| AppError::InvalidId(raw_id.to_string()))?;

        let _guard = self.lock.lock().await;
        let mut container = self
            .store
            .load()
            .map_err(|e| delete_failed(id, e))?;

        let index = container
            .position(id)
            .ok_or_else(|| AppError::BookNotFound(id.to_string()))?;
        let removed = container.books.remove(index);
        self.commit(&container).map_err(|e| delete_failed(id, e))?;

        info!(book_id = id, "Book deleted");
        Ok(removed)
    }

    /// Write the container back according to the write policy
    fn commit(&self, container: &Container) -> Result<(), StoreError> {
        match self.store.save(container) {
            Ok(()) => {
                debug!(books = container.books.len(), "Container saved");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to save books");
                match self.write_policy {
                    WritePolicy::Lenient => Ok(()),
                    WritePolicy::Strict => Err(e),
                }
            }
        }
    }
}

fn delete_failed(id: BookId, err: StoreError) -> AppError {
    error!(book_id = id, error = %err, "Failed to delete book");
    AppError::Internal(anyhow::anyhow!("failed to delete book"))
}
