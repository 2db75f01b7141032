//! SQLite storage implementation
//!
//! This module provides the SQLite-backed implementation of the
//! CharacterStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{CharacterStore, StorageError, StorageResult};
use crate::storage::{CharacterRecord, RunRecord, RunStatus};
use crate::HolocronError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend for the character archive
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the archive database at the given path
    ///
    /// This is the only fatal failure point of a run: if the database
    /// cannot be opened or its schema cannot be ensured, the importer
    /// aborts before any work begins.
    pub fn open(path: &Path) -> Result<Self, HolocronError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, HolocronError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl CharacterStore for SqliteStore {
    fn upsert_character(&mut self, record: &CharacterRecord) -> StorageResult<()> {
        // Tagged upsert: the whole row is replaced on key conflict, so
        // re-importing a record is indistinguishable from importing it once
        self.conn.execute(
            "INSERT INTO characters
             (id, name, birth_year, eye_color, gender, hair_color, homeworld, mass, skin_color)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 birth_year = excluded.birth_year,
                 eye_color = excluded.eye_color,
                 gender = excluded.gender,
                 hair_color = excluded.hair_color,
                 homeworld = excluded.homeworld,
                 mass = excluded.mass,
                 skin_color = excluded.skin_color",
            params![
                record.id,
                record.name,
                record.birth_year,
                record.eye_color,
                record.gender,
                record.hair_color,
                record.homeworld,
                record.mass,
                record.skin_color,
            ],
        )?;
        Ok(())
    }

    fn get_character(&self, id: i64) -> StorageResult<Option<CharacterRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, birth_year, eye_color, gender, hair_color, homeworld, mass, skin_color
             FROM characters WHERE id = ?1",
        )?;

        let record = stmt
            .query_row(params![id], |row| {
                Ok(CharacterRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    birth_year: row.get(2)?,
                    eye_color: row.get(3)?,
                    gender: row.get(4)?,
                    hair_color: row.get(5)?,
                    homeworld: row.get(6)?,
                    mass: row.get(7)?,
                    skin_color: row.get(8)?,
                })
            })
            .optional()?;

        Ok(record)
    }

    fn count_characters(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM characters", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn flush(&mut self) -> StorageResult<()> {
        // With WAL journaling each upsert is already atomic; the checkpoint
        // moves everything into the main database file once per run
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(FULL);")?;
        Ok(())
    }

    fn create_run(&mut self) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, status) VALUES (?1, ?2)",
            params![now, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn complete_run(
        &mut self,
        run_id: i64,
        references_found: u64,
        records_saved: u64,
        records_skipped: u64,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2,
             references_found = ?3, records_saved = ?4, records_skipped = ?5
             WHERE id = ?6",
            params![
                RunStatus::Completed.to_db_string(),
                now,
                references_found as i64,
                records_saved as i64,
                records_skipped as i64,
                run_id
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }

    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, status,
             references_found, records_saved, records_skipped
             FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        let run = stmt
            .query_row([], |row| {
                Ok(RunRecord {
                    id: row.get(0)?,
                    started_at: row.get(1)?,
                    finished_at: row.get(2)?,
                    status: RunStatus::from_db_string(&row.get::<_, String>(3)?)
                        .unwrap_or(RunStatus::Running),
                    references_found: row.get::<_, Option<i64>>(4)?.map(|n| n as u64),
                    records_saved: row.get::<_, Option<i64>>(5)?.map(|n| n as u64),
                    records_skipped: row.get::<_, Option<i64>>(6)?.map(|n| n as u64),
                })
            })
            .optional()?;

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(id: i64, name: &str, mass: &str) -> CharacterRecord {
        CharacterRecord {
            id,
            name: Some(name.to_string()),
            birth_year: Some("19BBY".to_string()),
            eye_color: Some("blue".to_string()),
            gender: Some("male".to_string()),
            hair_color: Some("blond".to_string()),
            homeworld: Some("https://www.swapi.tech/api/planets/1".to_string()),
            mass: Some(mass.to_string()),
            skin_color: Some("fair".to_string()),
        }
    }

    #[test]
    fn test_open_in_memory() {
        assert!(SqliteStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_upsert_creates_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .upsert_character(&sample_record(1, "Luke Skywalker", "77"))
            .unwrap();

        assert_eq!(store.count_characters().unwrap(), 1);
        let loaded = store.get_character(1).unwrap().unwrap();
        assert_eq!(loaded.name.as_deref(), Some("Luke Skywalker"));
    }

    #[test]
    fn test_upsert_is_idempotent_and_second_write_wins() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store
            .upsert_character(&sample_record(1, "Luke Skywalker", "77"))
            .unwrap();
        store
            .upsert_character(&sample_record(1, "Luke Skywalker", "80"))
            .unwrap();

        // Exactly one row, holding the second call's values
        assert_eq!(store.count_characters().unwrap(), 1);
        let loaded = store.get_character(1).unwrap().unwrap();
        assert_eq!(loaded.mass.as_deref(), Some("80"));
    }

    #[test]
    fn test_upsert_replaces_whole_row() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .upsert_character(&sample_record(2, "C-3PO", "75"))
            .unwrap();

        // Re-import with a field missing: the NULL must overwrite, not merge
        let mut sparse = sample_record(2, "C-3PO", "75");
        sparse.eye_color = None;
        store.upsert_character(&sparse).unwrap();

        let loaded = store.get_character(2).unwrap().unwrap();
        assert_eq!(loaded.eye_color, None);
    }

    #[test]
    fn test_get_missing_character() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get_character(99).unwrap().is_none());
    }

    #[test]
    fn test_run_lifecycle() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        let run_id = store.create_run().unwrap();
        assert!(run_id > 0);

        let running = store.get_latest_run().unwrap().unwrap();
        assert_eq!(running.status, RunStatus::Running);
        assert!(running.finished_at.is_none());

        store.complete_run(run_id, 82, 80, 2).unwrap();

        let completed = store.get_latest_run().unwrap().unwrap();
        assert_eq!(completed.status, RunStatus::Completed);
        assert!(completed.finished_at.is_some());
        assert_eq!(completed.references_found, Some(82));
        assert_eq!(completed.records_saved, Some(80));
        assert_eq!(completed.records_skipped, Some(2));
    }

    #[test]
    fn test_complete_unknown_run_fails() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let result = store.complete_run(123, 0, 0, 0);
        assert!(matches!(result, Err(StorageError::RunNotFound(123))));
    }

    #[test]
    fn test_flush_succeeds_without_writes() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(store.flush().is_ok());
    }
}
