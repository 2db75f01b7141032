//! HTTP fetching for listing pages and character detail records
//!
//! Failure semantics follow the skip-and-log contract: transport failures
//! and non-success status codes are reported as errors for the caller to
//! classify as skips. There is no retry or backoff anywhere; the original
//! API gives no signal for which failures are transient.

use crate::api::{CharacterProperties, DetailEnvelope, ListingPage};
use crate::HolocronError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by all requests of a run
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page of the people listing
///
/// # Errors
///
/// * `HolocronError::Http` - transport failure (connection, timeout)
/// * `HolocronError::UnexpectedStatus` - non-success status code
/// * `HolocronError::MalformedBody` - body did not parse as a listing page
pub async fn fetch_listing_page(client: &Client, url: &str) -> Result<ListingPage, HolocronError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HolocronError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HolocronError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .json::<ListingPage>()
        .await
        .map_err(|e| HolocronError::MalformedBody {
            url: url.to_string(),
            message: e.to_string(),
        })
}

/// Fetches one character detail record
///
/// Same error classification as [`fetch_listing_page`]; the caller skips
/// the reference on any error and the batch continues.
pub async fn fetch_character(
    client: &Client,
    url: &str,
) -> Result<CharacterProperties, HolocronError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HolocronError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HolocronError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let envelope =
        response
            .json::<DetailEnvelope>()
            .await
            .map_err(|e| HolocronError::MalformedBody {
                url: url.to_string(),
                message: e.to_string(),
            })?;

    Ok(envelope.result.properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }
}
