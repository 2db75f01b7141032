//! Holocron main entry point
//!
//! A single run-to-completion invocation with no CLI flags. The API base,
//! database path, and concurrency ceiling are compile-time constants in
//! `config.rs`; log verbosity is the only knob, via the standard
//! `RUST_LOG` environment variable.

use holocron::config::ImportConfig;
use holocron::crawler::run_import;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("holocron=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ImportConfig::default();
    tracing::info!(
        "Importing from {} into {} (concurrency ceiling {})",
        config.api_base_url,
        config.database_path.display(),
        config.max_concurrent_requests
    );

    let summary = run_import(config).await?;
    println!("Import complete: {}", summary);

    Ok(())
}
