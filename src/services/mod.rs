//! Service layer
//!
//! Business logic that sits between the HTTP handlers and the store.

pub mod books;

pub use books::{BookService, IdStrategy, WritePolicy};
