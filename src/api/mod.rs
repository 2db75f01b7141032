//! Wire types and identifier handling for the character API

mod identifier;
mod types;

pub use identifier::extract_character_id;
pub use types::{CharacterProperties, CharacterRef, DetailEnvelope, DetailResult, ListingPage};
