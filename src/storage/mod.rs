//! Storage module for the character archive
//!
//! This module handles all database operations for the importer, including:
//! - SQLite database initialization and schema management
//! - Full-row character upserts keyed by identifier
//! - Run bookkeeping and summary counts

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{CharacterStore, StorageError, StorageResult};

/// A fully resolved character record as it is stored
///
/// The identifier embedded in the record's own locator is the table key;
/// rows are replaced wholesale on re-import, never merged field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub id: i64,
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub gender: Option<String>,
    pub hair_color: Option<String>,
    /// Homeworld locator, kept as the raw URL string
    pub homeworld: Option<String>,
    pub mass: Option<String>,
    pub skin_color: Option<String>,
}

/// Bookkeeping row for one import run
///
/// Observability only; runs are never read back to resume work.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub status: RunStatus,
    pub references_found: Option<u64>,
    pub records_saved: Option<u64>,
    pub records_skipped: Option<u64>,
}

/// Status of an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_roundtrip() {
        for status in &[RunStatus::Running, RunStatus::Completed] {
            let db_str = status.to_db_string();
            assert_eq!(RunStatus::from_db_string(db_str), Some(*status));
        }
    }

    #[test]
    fn test_run_status_invalid() {
        assert_eq!(RunStatus::from_db_string("invalid"), None);
    }
}
