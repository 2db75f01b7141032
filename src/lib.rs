//! Holocron: a bounded-concurrency character importer
//!
//! This crate walks the paginated people listing of the swapi.tech API,
//! fetches each character's detail record with a fixed concurrency ceiling,
//! and upserts the results into a local SQLite archive.

pub mod api;
pub mod config;
pub mod crawler;
pub mod storage;

use thiserror::Error;

/// Main error type for Holocron operations
#[derive(Debug, Error)]
pub enum HolocronError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Malformed response body for {url}: {message}")]
    MalformedBody { url: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Holocron operations
pub type Result<T> = std::result::Result<T, HolocronError>;

// Re-export commonly used types
pub use api::{extract_character_id, CharacterProperties, ListingPage};
pub use config::ImportConfig;
pub use crawler::{run_import, Coordinator, ImportSummary};
pub use storage::{CharacterRecord, CharacterStore, SqliteStore};
