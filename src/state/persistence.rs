//! Book persistence module
//!
//! Whole-file load and save of the JSON container

use super::book::Container;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error types for persistence operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be read or written
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File the operation touched
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The database file is not a valid container document
    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The container could not be serialized
    #[error("JSON serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Whole-collection access to persisted books
///
/// Implementations are synchronous: each call either completes fully or
/// fails.
pub trait BookStore: Send + Sync {
    /// Read and parse the entire container
    fn load(&self) -> Result<Container, StoreError>;

    /// Overwrite the persisted container in full
    fn save(&self, container: &Container) -> Result<(), StoreError>;
}

/// Store backed by a single JSON file on local disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the file at `path`
    ///
    /// The file is not touched until the first load or save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty container if the backing file does not exist yet
    ///
    /// # Returns
    /// * `Ok(true)` if a new file was created
    /// * `Ok(false)` if the file already existed
    /// * `Err(StoreError)` if the file could not be created
    pub fn init_if_missing(&self) -> Result<bool, StoreError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Container::default())?;
        Ok(true)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Sibling temp file used while saving, e.g. `db.json` -> `db.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

impl BookStore for JsonFileStore {
    fn load(&self) -> Result<Container, StoreError> {
        let json = fs::read_to_string(&self.path).map_err(|e| self.io_error(&self.path, e))?;
        serde_json::from_str(&json).map_err(StoreError::Parse)
    }

    fn save(&self, container: &Container) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(container).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        // Readers never observe a partially written file
        let tmp_path = tmp_path_for(&self.path);
        fs::write(&tmp_path, json).map_err(|e| self.io_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(&self.path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::book::Book;
    use serde_json::{json, Map};
    use tempfile::{NamedTempFile, TempDir};

    fn book(id: i64, title: &str) -> Book {
        let mut fields = Map::new();
        fields.insert("title".to_string(), json!(title));
        Book::new(id, fields)
    }

    #[test]
    fn test_save_and_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = JsonFileStore::new(temp_file.path());

        let container = Container {
            books: vec![book(1, "A"), book(2, "B")],
            ..Default::default()
        };
        store.save(&container).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, container);
        assert_eq!(loaded.books[1].fields["title"], "B");
    }

    #[test]
    fn test_load_from_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"));

        match store.load() {
            Err(StoreError::Io { path, .. }) => assert!(path.ends_with("missing.json")),
            other => panic!("Expected Io error, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "{ not json").unwrap();
        let store = JsonFileStore::new(temp_file.path());

        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_save_preserves_sibling_members() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"{"books":[{"id":1,"title":"A"}],"authors":["Le Guin"]}"#,
        )
        .unwrap();
        let store = JsonFileStore::new(temp_file.path());

        let mut container = store.load().unwrap();
        container.books.push(book(2, "B"));
        store.save(&container).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(temp_file.path()).unwrap()).unwrap();
        assert_eq!(raw["authors"], json!(["Le Guin"]));
        assert_eq!(raw["books"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_init_if_missing_creates_empty_container() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("db.json"));

        assert!(store.init_if_missing().unwrap());
        assert!(store.load().unwrap().books.is_empty());

        // Second call leaves the existing file alone
        assert!(!store.init_if_missing().unwrap());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let store = JsonFileStore::new(&path);

        store.save(&Container::default()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("db.json.tmp").exists());
    }

    #[test]
    fn test_save_keeps_unrelated_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let unrelated = dir.path().join("db.tmp");
        std::fs::write(&unrelated, "keep me").unwrap();
        let store = JsonFileStore::new(&path);

        store.save(&Container::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&unrelated).unwrap(), "keep me");
        assert_eq!(tmp_path_for(&path), dir.path().join("db.json.tmp"));
    }
}
