//! Import coordinator - main run orchestration logic
//!
//! Drives a run through its phases:
//! 1. Open the store and ensure the schema (the only fatal failure point)
//! 2. Drain the pagination chain sequentially
//! 3. Fan out one fetch task per reference, throttled by the shared gate;
//!    each task persists its own record as soon as the result arrives
//! 4. Apply the single durability barrier and record the run summary
//!
//! There is no checkpoint or resume state between runs; re-running is safe
//! purely because every write is a full-row upsert.

use crate::config::ImportConfig;
use crate::crawler::fetcher::{build_http_client, fetch_character};
use crate::crawler::walker::collect_character_urls;
use crate::storage::{CharacterStore, SqliteStore};
use crate::Result;
use reqwest::Client;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of one fetch-and-persist task
enum TaskOutcome {
    Saved,
    FetchSkipped,
    IdentifierSkipped,
    WriteSkipped,
}

/// Counts reported at the end of a run
///
/// Partial failures are visible only here and in the logs; they never fail
/// the run or change the exit code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// References collected by the pagination walk
    pub references_found: usize,

    /// Records written to the store
    pub records_saved: usize,

    /// References skipped because the detail fetch failed
    pub fetch_skipped: usize,

    /// Records dropped because their identifier could not be parsed
    pub identifier_skipped: usize,

    /// Records whose store write failed
    pub write_skipped: usize,
}

impl ImportSummary {
    /// Total references that contributed no row
    pub fn records_skipped(&self) -> usize {
        self.fetch_skipped + self.identifier_skipped + self.write_skipped
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} references, {} saved, {} skipped ({} fetch, {} identifier, {} write)",
            self.references_found,
            self.records_saved,
            self.records_skipped(),
            self.fetch_skipped,
            self.identifier_skipped,
            self.write_skipped
        )
    }
}

/// Coordinates one import run
pub struct Coordinator {
    config: ImportConfig,
    store: Arc<Mutex<SqliteStore>>,
    client: Client,
    gate: Arc<Semaphore>,
    run_id: i64,
}

impl Coordinator {
    /// Opens the store and prepares a new run
    ///
    /// # Errors
    ///
    /// Failing to open or initialize the store aborts here, before any
    /// network work begins. Every later failure is a per-item skip.
    pub fn new(config: ImportConfig) -> Result<Self> {
        let mut store = SqliteStore::open(&config.database_path)?;
        let run_id = store.create_run()?;
        let client = build_http_client()?;
        let gate = Arc::new(Semaphore::new(config.max_concurrent_requests));

        Ok(Self {
            config,
            store: Arc::new(Mutex::new(store)),
            client,
            gate,
            run_id,
        })
    }

    /// Runs the import to completion and returns the summary
    pub async fn run(&mut self) -> Result<ImportSummary> {
        tracing::info!("Starting import run {}", self.run_id);

        // Drain the pagination chain before any detail fetch is issued
        let references =
            collect_character_urls(&self.client, &self.config.people_endpoint(), &self.gate).await;

        let mut summary = ImportSummary {
            references_found: references.len(),
            ..ImportSummary::default()
        };

        // One task per reference; the gate bounds how many requests are in
        // flight, the tasks themselves are all spawned up front
        let mut tasks = JoinSet::new();
        for reference in references {
            let client = self.client.clone();
            let gate = Arc::clone(&self.gate);
            let store = Arc::clone(&self.store);
            tasks.spawn(async move { fetch_and_persist(client, gate, store, reference).await });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(TaskOutcome::Saved) => summary.records_saved += 1,
                Ok(TaskOutcome::FetchSkipped) => summary.fetch_skipped += 1,
                Ok(TaskOutcome::IdentifierSkipped) => summary.identifier_skipped += 1,
                Ok(TaskOutcome::WriteSkipped) => summary.write_skipped += 1,
                Err(e) => {
                    tracing::warn!("Fetch task failed to complete: {}", e);
                    summary.fetch_skipped += 1;
                }
            }
        }

        // Single durability barrier after all upserts, then bookkeeping.
        // Past startup no store failure is fatal: the rows already written
        // stand on the store's per-statement atomicity
        {
            let mut store = self.store.lock().unwrap();
            if let Err(e) = store.flush() {
                tracing::warn!("Durability barrier failed for run {}: {}", self.run_id, e);
            }
            if let Err(e) = store.complete_run(
                self.run_id,
                summary.references_found as u64,
                summary.records_saved as u64,
                summary.records_skipped() as u64,
            ) {
                tracing::warn!("Failed to record summary for run {}: {}", self.run_id, e);
            }
        }

        tracing::info!("Import run {} done: {}", self.run_id, summary);
        Ok(summary)
    }
}

/// Fetches one record and writes it through the shared store
///
/// The gate permit covers only the HTTP exchange and is released
/// unconditionally, success or failure, before the write happens.
async fn fetch_and_persist(
    client: Client,
    gate: Arc<Semaphore>,
    store: Arc<Mutex<SqliteStore>>,
    reference: String,
) -> TaskOutcome {
    let fetched = {
        let _permit = gate.acquire_owned().await.expect("request gate closed");
        fetch_character(&client, &reference).await
    };

    let properties = match fetched {
        Ok(properties) => properties,
        Err(e) => {
            tracing::warn!("Skipping {}: {}", reference, e);
            return TaskOutcome::FetchSkipped;
        }
    };

    let name = properties
        .name
        .clone()
        .unwrap_or_else(|| "<unnamed>".to_string());

    let record = match properties.into_record() {
        Some(record) => record,
        None => {
            tracing::warn!(
                "Dropping record for {} ({}): unparseable identifier",
                name,
                reference
            );
            return TaskOutcome::IdentifierSkipped;
        }
    };

    let written = store.lock().unwrap().upsert_character(&record);
    match written {
        Ok(()) => {
            tracing::debug!("Saved character {} (id {})", name, record.id);
            TaskOutcome::Saved
        }
        Err(e) => {
            tracing::warn!("Failed to save character {} (id {}): {}", name, record.id, e);
            TaskOutcome::WriteSkipped
        }
    }
}

/// Runs a complete import with the given configuration
///
/// This is the main library entry point: it opens the store, walks the
/// listing, fetches and persists every reachable record, and returns the
/// summary counts.
pub async fn run_import(config: ImportConfig) -> Result<ImportSummary> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
