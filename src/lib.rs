//! Books API Library
//!
//! A JSON-file-backed CRUD service for a collection of book records.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
/// Book data model and persistence
///
/// Handles the on-disk container and whole-file load/save.
pub mod state;
