// State management module
// Handles the book data model and its on-disk persistence

pub mod book;
pub mod persistence;

pub use book::{parse_book_id, Book, BookFields, BookId, Container};
pub use persistence::{BookStore, JsonFileStore, StoreError};
