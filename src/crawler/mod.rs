//! Import pipeline: pagination walk, bounded fetch, opportunistic persist
//!
//! This module contains the core import logic, including:
//! - HTTP fetching for listing pages and detail records
//! - The sequential pagination walker
//! - Run coordination under a shared concurrency gate

mod coordinator;
mod fetcher;
mod walker;

pub use coordinator::{run_import, Coordinator, ImportSummary};
pub use fetcher::{build_http_client, fetch_character, fetch_listing_page};
pub use walker::collect_character_urls;
