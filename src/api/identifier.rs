//! Identifier extraction from record locators

use url::Url;

/// Extracts the integer identifier from a record's locator
///
/// The identifier is the last non-empty path segment, so trailing slashes
/// and query strings are tolerated. Returns `None` when the locator does
/// not parse as an absolute URL or the segment is not an integer; callers
/// drop such records without aborting the run.
///
/// # Example
///
/// ```
/// use holocron::api::extract_character_id;
///
/// assert_eq!(extract_character_id("https://www.swapi.tech/api/people/4"), Some(4));
/// assert_eq!(extract_character_id("https://www.swapi.tech/api/people/leia"), None);
/// ```
pub fn extract_character_id(locator: &str) -> Option<i64> {
    let url = Url::parse(locator).ok()?;
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    segment.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_plain_id() {
        assert_eq!(
            extract_character_id("https://www.swapi.tech/api/people/1"),
            Some(1)
        );
    }

    #[test]
    fn test_tolerates_trailing_slash() {
        assert_eq!(
            extract_character_id("https://www.swapi.tech/api/people/42/"),
            Some(42)
        );
    }

    #[test]
    fn test_tolerates_query_string() {
        assert_eq!(
            extract_character_id("https://www.swapi.tech/api/people/7?format=json"),
            Some(7)
        );
    }

    #[test]
    fn test_rejects_non_numeric_segment() {
        assert_eq!(
            extract_character_id("https://www.swapi.tech/api/people/leia"),
            None
        );
    }

    #[test]
    fn test_rejects_relative_locator() {
        assert_eq!(extract_character_id("/api/people/1"), None);
    }

    #[test]
    fn test_rejects_empty_path() {
        assert_eq!(extract_character_id("https://www.swapi.tech/"), None);
        assert_eq!(extract_character_id(""), None);
    }
}
