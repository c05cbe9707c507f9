//! Book data model
//!
//! Records, the on-disk container, and id parsing

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier of a book record
pub type BookId = i64;

/// Caller-supplied fields of a book, opaque to the service
pub type BookFields = Map<String, Value>;

/// A single book record
///
/// Only `id` is interpreted; every other field is carried verbatim in
/// insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier, immutable once assigned
    pub id: BookId,
    /// Remaining fields as supplied by callers
    #[serde(flatten)]
    pub fields: BookFields,
}

impl Book {
    /// Build a new book from a payload, discarding any `id` the payload carries
    pub fn new(id: BookId, mut payload: BookFields) -> Self {
        payload.remove("id");
        Self {
            id,
            fields: payload,
        }
    }

    /// Shallow-merge `payload` over this book's fields
    ///
    /// Existing keys are overwritten in place, new keys are appended and
    /// `id` is never touched.
    pub fn merge(&mut self, payload: BookFields) {
        for (key, value) in payload {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// Root JSON document persisted by the store
///
/// Only `books` is read or modified; sibling members survive a
/// load/save cycle untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Container {
    /// The book collection, in insertion order
    pub books: Vec<Book>,
    /// Any other top-level members of the document
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Container {
    /// Position of the book with the given id, if any
    pub fn position(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Reference to the book with the given id, if any
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }
}

/// Parse a raw path segment into a book id
///
/// Accepts an optionally signed decimal integer with surrounding
/// whitespace; anything else is rejected.
pub fn parse_book_id(raw: &str) -> Option<BookId> {
    raw.trim().parse::<BookId>().ok()
}
