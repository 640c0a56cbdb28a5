//! PokeAPI DTOs and the assembled view model.
//!
//! # Design
//! Only the fields the detail screen reads are modelled; serde ignores the
//! rest of PokeAPI's (large) payloads. Ids and resource names default when
//! absent so hand-written fixtures can stay minimal, while the fields the
//! pipeline actually extracts are required.

use serde::{Deserialize, Serialize};

/// A `{name, url}` pointer to another PokeAPI resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    pub url: String,
}

/// A language tag as PokeAPI nests it (`{"name": "ja-Hrkt", "url": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub name: String,
}

/// `GET /api/v2/pokemon/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonRecord {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub species: NamedResource,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprites {
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artwork {
    pub front_default: String,
}

/// One entry of a pokemon's `types` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// `GET /api/v2/type/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeInfo {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub names: Vec<LocalizedName>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedName {
    pub name: String,
    pub language: Language,
}

/// `GET /api/v2/pokemon-species/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesInfo {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub flavor_text_entries: Vec<FlavorText>,
    pub genera: Vec<Genus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genus {
    pub genus: String,
    pub language: Language,
}

/// Everything the detail screen displays for one pokemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonDetails {
    pub id: u32,
    pub sprite_url: String,
    /// Localized type names, in the order of the record's type slots.
    pub type_names: Vec<String>,
    pub weight: u32,
    pub genus: String,
    pub flavor_text: String,
}
