use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

pub const SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

const API: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Artwork {
    pub front_default: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork")]
    pub official_artwork: Artwork,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sprites {
    pub other: OtherSprites,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub species: NamedResource,
    pub weight: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Name {
    pub name: String,
    pub language: Language,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonType {
    pub id: u32,
    pub name: String,
    pub names: Vec<Name>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: Language,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: Language,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorText>,
    pub genera: Vec<Genus>,
}

/// What an endpoint answers for one id.
#[derive(Clone, Debug)]
pub enum Fixture {
    /// 200 with this JSON body.
    Body(Value),
    /// 200 with an empty body.
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Pokemon,
    Type,
    Species,
}

/// Every response the server can give, keyed by resource and id.
#[derive(Clone, Debug, Default)]
pub struct Fixtures {
    entries: HashMap<(Resource, u32), Fixture>,
}

impl Fixtures {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The starter pokemon plus Pikachu, their types and species.
    pub fn seeded() -> Self {
        let mut fixtures = Self::empty();
        for (id, en, ja, ja_kana) in TYPES {
            fixtures.insert_json(Resource::Type, *id, &type_record(*id, en, ja, ja_kana));
        }
        for seed in SEEDS {
            fixtures.insert_json(Resource::Pokemon, seed.id, &pokemon(seed));
            fixtures.insert_json(Resource::Species, seed.id, &species(seed));
        }
        fixtures
    }

    pub fn insert(&mut self, resource: Resource, id: u32, fixture: Fixture) -> &mut Self {
        self.entries.insert((resource, id), fixture);
        self
    }

    pub fn insert_json<T: Serialize>(&mut self, resource: Resource, id: u32, body: &T) -> &mut Self {
        let value = serde_json::to_value(body).unwrap_or(Value::Null);
        self.insert(resource, id, Fixture::Body(value))
    }

    pub fn remove(&mut self, resource: Resource, id: u32) -> &mut Self {
        self.entries.remove(&(resource, id));
        self
    }

    pub fn get(&self, resource: Resource, id: u32) -> Option<&Fixture> {
        self.entries.get(&(resource, id))
    }
}

pub type Db = Arc<Fixtures>;

pub fn app() -> Router {
    app_with(Fixtures::seeded())
}

pub fn app_with(fixtures: Fixtures) -> Router {
    let db: Db = Arc::new(fixtures);
    // PokeAPI answers with and without the trailing slash; so do we.
    Router::new()
        .route("/api/v2/pokemon/{id}", get(get_pokemon))
        .route("/api/v2/pokemon/{id}/", get(get_pokemon))
        .route("/api/v2/type/{id}", get(get_type))
        .route("/api/v2/type/{id}/", get(get_type))
        .route("/api/v2/pokemon-species/{id}", get(get_species))
        .route("/api/v2/pokemon-species/{id}/", get(get_species))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, fixtures: Fixtures) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(fixtures)).await
}

async fn get_pokemon(State(db): State<Db>, Path(id): Path<u32>) -> Response {
    respond(&db, Resource::Pokemon, id)
}

async fn get_type(State(db): State<Db>, Path(id): Path<u32>) -> Response {
    respond(&db, Resource::Type, id)
}

async fn get_species(State(db): State<Db>, Path(id): Path<u32>) -> Response {
    respond(&db, Resource::Species, id)
}

fn respond(db: &Fixtures, resource: Resource, id: u32) -> Response {
    match db.get(resource, id) {
        Some(Fixture::Body(body)) => Json(body.clone()).into_response(),
        Some(Fixture::Empty) => StatusCode::OK.into_response(),
        None => {
            tracing::debug!(?resource, id, "no fixture");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// (id, english, ja, ja-Hrkt)
const TYPES: &[(u32, &str, &str, &str)] = &[
    (3, "Flying", "飛行", "ひこう"),
    (10, "Fire", "炎", "ほのお"),
    (11, "Water", "水", "みず"),
    (12, "Grass", "草", "くさ"),
    (13, "Electric", "電気", "でんき"),
];

struct Seed {
    id: u32,
    slug: &'static str,
    ja_name: &'static str,
    types: &'static [u32],
    weight: u32,
    genus_en: &'static str,
    genus_ja: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed { id: 25, slug: "pikachu", ja_name: "ピカチュウ", types: &[13], weight: 60, genus_en: "Mouse Pokémon", genus_ja: "ねずみポケモン" },
    Seed { id: 152, slug: "chikorita", ja_name: "チコリータ", types: &[12], weight: 64, genus_en: "Leaf Pokémon", genus_ja: "はっぱポケモン" },
    Seed { id: 155, slug: "cyndaquil", ja_name: "ヒノアラシ", types: &[10], weight: 79, genus_en: "Fire Mouse Pokémon", genus_ja: "ひねずみポケモン" },
    Seed { id: 158, slug: "totodile", ja_name: "ワニノコ", types: &[11], weight: 95, genus_en: "Big Jaw Pokémon", genus_ja: "おおあごポケモン" },
    Seed { id: 252, slug: "treecko", ja_name: "キモリ", types: &[12], weight: 50, genus_en: "Wood Gecko Pokémon", genus_ja: "もりトカゲポケモン" },
    Seed { id: 255, slug: "torchic", ja_name: "アチャモ", types: &[10], weight: 25, genus_en: "Chick Pokémon", genus_ja: "ひよこポケモン" },
    Seed { id: 258, slug: "mudkip", ja_name: "ミズゴロウ", types: &[11], weight: 76, genus_en: "Mud Fish Pokémon", genus_ja: "ぬまうおポケモン" },
    Seed { id: 387, slug: "turtwig", ja_name: "ナエトル", types: &[12], weight: 102, genus_en: "Tiny Leaf Pokémon", genus_ja: "わかばポケモン" },
    Seed { id: 390, slug: "chimchar", ja_name: "ヒコザル", types: &[10], weight: 62, genus_en: "Chimp Pokémon", genus_ja: "こざるポケモン" },
    Seed { id: 495, slug: "snivy", ja_name: "ツタージャ", types: &[12], weight: 81, genus_en: "Grass Snake Pokémon", genus_ja: "くさへびポケモン" },
    Seed { id: 498, slug: "tepig", ja_name: "ポカブ", types: &[10], weight: 99, genus_en: "Fire Pig Pokémon", genus_ja: "ひぶたポケモン" },
    Seed { id: 501, slug: "oshawott", ja_name: "ミジュマル", types: &[11], weight: 59, genus_en: "Sea Otter Pokémon", genus_ja: "ラッコポケモン" },
    Seed { id: 650, slug: "chespin", ja_name: "ハリマロン", types: &[12], weight: 90, genus_en: "Spiny Nut Pokémon", genus_ja: "いがぐりポケモン" },
    Seed { id: 653, slug: "fennekin", ja_name: "フォッコ", types: &[10], weight: 94, genus_en: "Fox Pokémon", genus_ja: "きつねポケモン" },
    Seed { id: 656, slug: "froakie", ja_name: "ケロマツ", types: &[11], weight: 70, genus_en: "Bubble Frog Pokémon", genus_ja: "あわがえるポケモン" },
    Seed { id: 722, slug: "rowlet", ja_name: "モクロー", types: &[12, 3], weight: 15, genus_en: "Grass Quill Pokémon", genus_ja: "くさばねポケモン" },
    Seed { id: 725, slug: "litten", ja_name: "ニャビー", types: &[10], weight: 43, genus_en: "Fire Cat Pokémon", genus_ja: "ひねこポケモン" },
    Seed { id: 728, slug: "popplio", ja_name: "アシマリ", types: &[11], weight: 75, genus_en: "Sea Lion Pokémon", genus_ja: "あしかポケモン" },
    Seed { id: 810, slug: "grookey", ja_name: "サルノリ", types: &[12], weight: 50, genus_en: "Chimp Pokémon", genus_ja: "こざるポケモン" },
    Seed { id: 813, slug: "scorbunny", ja_name: "ヒバニー", types: &[10], weight: 45, genus_en: "Rabbit Pokémon", genus_ja: "うさぎポケモン" },
    Seed { id: 816, slug: "sobble", ja_name: "メッソン", types: &[11], weight: 40, genus_en: "Water Lizard Pokémon", genus_ja: "みずとかげポケモン" },
];

fn language(name: &str) -> Language {
    Language {
        name: name.to_string(),
    }
}

fn type_slug(id: u32) -> &'static str {
    match id {
        3 => "flying",
        10 => "fire",
        11 => "water",
        12 => "grass",
        13 => "electric",
        _ => "unknown",
    }
}

fn type_record(id: u32, en: &str, ja: &str, ja_kana: &str) -> PokemonType {
    PokemonType {
        id,
        name: type_slug(id).to_string(),
        names: vec![
            Name { name: ja_kana.to_string(), language: language("ja-Hrkt") },
            Name { name: en.to_string(), language: language("en") },
            Name { name: ja.to_string(), language: language("ja") },
        ],
    }
}

fn pokemon(seed: &Seed) -> Pokemon {
    Pokemon {
        id: seed.id,
        name: seed.slug.to_string(),
        sprites: Sprites {
            other: OtherSprites {
                official_artwork: Artwork {
                    front_default: format!("{SPRITE_BASE}/{}.png", seed.id),
                },
            },
        },
        types: seed
            .types
            .iter()
            .enumerate()
            .map(|(i, &type_id)| TypeSlot {
                slot: i as u8 + 1,
                kind: NamedResource {
                    name: type_slug(type_id).to_string(),
                    url: format!("{API}/type/{type_id}/"),
                },
            })
            .collect(),
        species: NamedResource {
            name: seed.slug.to_string(),
            url: format!("{API}/pokemon-species/{}/", seed.id),
        },
        weight: seed.weight,
    }
}

fn species(seed: &Seed) -> Species {
    Species {
        id: seed.id,
        name: seed.slug.to_string(),
        flavor_text_entries: vec![
            FlavorText {
                flavor_text: format!("Pokédex entry for {}.", seed.slug),
                language: language("en"),
            },
            FlavorText {
                flavor_text: format!("{}の ずかん せつめい。", seed.ja_name),
                language: language("ja"),
            },
        ],
        genera: vec![
            Genus { genus: seed.genus_en.to_string(), language: language("en") },
            Genus { genus: seed.genus_ja.to_string(), language: language("ja-Hrkt") },
            Genus { genus: seed.genus_ja.to_string(), language: language("ja") },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pokemon_serializes_to_pokeapi_shape() {
        let fixtures = Fixtures::seeded();
        let Some(Fixture::Body(json)) = fixtures.get(Resource::Pokemon, 25) else {
            panic!("pikachu fixture missing");
        };
        assert_eq!(json["name"], "pikachu");
        assert_eq!(json["weight"], 60);
        assert_eq!(json["types"][0]["type"]["url"], "https://pokeapi.co/api/v2/type/13/");
        assert_eq!(json["species"]["url"], "https://pokeapi.co/api/v2/pokemon-species/25/");
        assert_eq!(
            json["sprites"]["other"]["official-artwork"]["front_default"],
            format!("{SPRITE_BASE}/25.png")
        );
    }

    #[test]
    fn every_referenced_type_is_seeded() {
        let fixtures = Fixtures::seeded();
        for seed in SEEDS {
            for &type_id in seed.types {
                assert!(fixtures.get(Resource::Type, type_id).is_some(), "type {type_id}");
            }
            assert!(fixtures.get(Resource::Species, seed.id).is_some());
        }
    }

    #[test]
    fn type_names_include_kana_label() {
        let record = type_record(13, "Electric", "電気", "でんき");
        let kana: Vec<_> = record
            .names
            .iter()
            .filter(|n| n.language.name == "ja-Hrkt")
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(kana, vec!["でんき"]);
    }

    #[test]
    fn remove_and_insert_override_seed() {
        let mut fixtures = Fixtures::seeded();
        fixtures
            .remove(Resource::Type, 13)
            .insert(Resource::Species, 25, Fixture::Empty);
        assert!(fixtures.get(Resource::Type, 13).is_none());
        assert!(matches!(fixtures.get(Resource::Species, 25), Some(Fixture::Empty)));
    }
}
