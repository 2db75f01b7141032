//! Compile-time configuration
//!
//! There is no runtime configuration surface: the binary takes no flags and
//! reads no config file. The constants below are the single source of the
//! importer's defaults. `ImportConfig` carries them through the library so
//! the integration tests can point the importer at a mock server and a
//! scratch database without touching globals.

use std::path::PathBuf;

/// Base URL of the API to import from (no trailing slash)
pub const API_BASE_URL: &str = "https://www.swapi.tech/api";

/// Path of the SQLite archive, relative to the working directory
pub const DATABASE_PATH: &str = "star_wars.db";

/// Maximum number of simultaneously in-flight HTTP requests
pub const MAX_CONCURRENT_REQUESTS: usize = 10;

/// Settings for one import run
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Base URL of the API (no trailing slash)
    pub api_base_url: String,

    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Concurrency ceiling shared by all HTTP requests
    pub max_concurrent_requests: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            database_path: PathBuf::from(DATABASE_PATH),
            max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl ImportConfig {
    /// The paginated listing endpoint the walk starts from
    pub fn people_endpoint(&self) -> String {
        format!("{}/people", self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_constants() {
        let config = ImportConfig::default();
        assert_eq!(config.api_base_url, API_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from(DATABASE_PATH));
        assert_eq!(config.max_concurrent_requests, MAX_CONCURRENT_REQUESTS);
    }

    #[test]
    fn test_people_endpoint() {
        let config = ImportConfig {
            api_base_url: "http://127.0.0.1:8080/api".to_string(),
            ..ImportConfig::default()
        };
        assert_eq!(config.people_endpoint(), "http://127.0.0.1:8080/api/people");
    }
}
