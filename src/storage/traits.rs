//! Storage traits and error types

use crate::storage::{CharacterRecord, RunRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for character archive backends
///
/// The importer is the sole writer. Every write is an independent
/// full-row upsert; correctness under any task interleaving relies on the
/// backend's per-statement atomicity, not on application-level locking.
pub trait CharacterStore {
    // ===== Character Records =====

    /// Writes a record as a full-row upsert
    ///
    /// If a row with the record's identifier already exists, all of its
    /// columns are overwritten; otherwise a new row is created.
    fn upsert_character(&mut self, record: &CharacterRecord) -> StorageResult<()>;

    /// Gets a character by identifier
    fn get_character(&self, id: i64) -> StorageResult<Option<CharacterRecord>>;

    /// Counts stored characters
    fn count_characters(&self) -> StorageResult<u64>;

    /// Applies the once-per-run durability barrier
    ///
    /// Called a single time after all individual upserts have been issued,
    /// not per record.
    fn flush(&mut self) -> StorageResult<()>;

    // ===== Run Bookkeeping =====

    /// Creates a new run row in the running state
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self) -> StorageResult<i64>;

    /// Marks a run as completed and records its summary counts
    fn complete_run(
        &mut self,
        run_id: i64,
        references_found: u64,
        records_saved: u64,
        records_skipped: u64,
    ) -> StorageResult<()>;

    /// Gets the most recent run, if any
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;
}
