//! Pagination walker
//!
//! Walks the `next` chain of the listing endpoint. The walk is sequential
//! because each page depends on the previous page's continuation locator;
//! there is nothing to parallelize here.

use crate::crawler::fetcher::fetch_listing_page;
use reqwest::Client;
use tokio::sync::Semaphore;
use url::Url;

/// Collects every character reference reachable from `start_url`
///
/// A failed page request (transport error, non-success status, or a
/// malformed body) terminates the walk immediately; the references already
/// collected are kept and returned, not discarded. There are no retries.
///
/// The request gate is shared with the detail fetch tasks so the global
/// concurrency ceiling also covers listing requests.
pub async fn collect_character_urls(
    client: &Client,
    start_url: &str,
    gate: &Semaphore,
) -> Vec<String> {
    let mut references = Vec::new();
    let mut current = Some(start_url.to_string());

    while let Some(url) = current.take() {
        let page = {
            let _permit = gate.acquire().await.expect("request gate closed");
            match fetch_listing_page(client, &url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Listing walk stopped at {}: {}", url, e);
                    break;
                }
            }
        };

        tracing::debug!(
            "Listing page {} yielded {} references",
            url,
            page.results.len()
        );
        references.extend(page.results.into_iter().map(|r| r.url));

        current = match page.next {
            Some(next) if Url::parse(&next).is_ok() => Some(next),
            Some(next) => {
                tracing::warn!("Malformed continuation locator {}, ending walk", next);
                None
            }
            None => None,
        };
    }

    tracing::info!("Collected {} character references", references.len());
    references
}
