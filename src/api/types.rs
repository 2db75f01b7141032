//! Typed views of the listing and detail JSON bodies

use crate::api::extract_character_id;
use crate::storage::CharacterRecord;
use serde::Deserialize;

/// One page of the paginated people listing
///
/// `next` carries the absolute URL of the following page, or null at the
/// end of the chain. Pages are transient and never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    /// References on this page
    #[serde(default)]
    pub results: Vec<CharacterRef>,

    /// Continuation locator, absent on the final page
    #[serde(default)]
    pub next: Option<String>,
}

/// A reference to one retrievable character detail record
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRef {
    /// Display name, used only for logging
    #[serde(default)]
    pub name: String,

    /// Locator of the detail record
    pub url: String,
}

/// Envelope around a character detail response body
#[derive(Debug, Clone, Deserialize)]
pub struct DetailEnvelope {
    pub result: DetailResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailResult {
    pub properties: CharacterProperties,
}

/// The fields of one character record as the API returns them
///
/// `url` is the record's own locator and the sole source of its stored
/// identifier. The descriptive attributes are all optional; absent fields
/// become NULL columns.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterProperties {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub birth_year: Option<String>,

    #[serde(default)]
    pub eye_color: Option<String>,

    #[serde(default)]
    pub gender: Option<String>,

    #[serde(default)]
    pub hair_color: Option<String>,

    /// Homeworld locator, stored as the raw URL string
    #[serde(default)]
    pub homeworld: Option<String>,

    #[serde(default)]
    pub mass: Option<String>,

    #[serde(default)]
    pub skin_color: Option<String>,
}

impl CharacterProperties {
    /// Converts into a storable record
    ///
    /// Extracts the identifier from the record's own locator. Returns
    /// `None` when the identifier cannot be parsed; the caller drops the
    /// record with a log line and no side effect.
    pub fn into_record(self) -> Option<CharacterRecord> {
        let id = extract_character_id(&self.url)?;
        Some(CharacterRecord {
            id,
            name: self.name,
            birth_year: self.birth_year,
            eye_color: self.eye_color,
            gender: self.gender,
            hair_color: self.hair_color,
            homeworld: self.homeworld,
            mass: self.mass,
            skin_color: self.skin_color,
        })
    }
}
