//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::services::books::{IdStrategy, WritePolicy};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Persistence configuration
    pub persistence: PersistenceConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
    /// Directory served for paths that match no API route
    pub public_dir: PathBuf,
}

/// Persistence configuration
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// JSON file holding the book collection
    pub db_path: PathBuf,
    /// How new book ids are computed
    pub id_strategy: IdStrategy,
    /// Whether failed writes are reported to callers
    pub write_policy: WritePolicy,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3001),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                public_dir: env::var("PUBLIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("public")),
            },
            persistence: PersistenceConfig {
                db_path: env::var("DB_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("db.json")),
                id_strategy: env::var("ID_STRATEGY")
                    .ok()
                    .map(|s| {
                        s.parse().unwrap_or_else(|_| {
                            tracing::warn!(value = %s, "Unknown ID_STRATEGY, using default");
                            IdStrategy::default()
                        })
                    })
                    .unwrap_or_default(),
                write_policy: match env::var("STRICT_WRITES").as_deref() {
                    Ok("true") | Ok("1") | Ok("yes") => WritePolicy::Strict,
                    _ => WritePolicy::Lenient,
                },
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
