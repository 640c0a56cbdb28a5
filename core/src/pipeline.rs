//! The detail fetch pipeline: pokemon → types → species → `PokemonDetails`.
//!
//! # Design
//! `DetailFetch` is a sans-IO state machine. It exposes the request it is
//! waiting on, consumes the matching response, and either moves to the
//! next request or yields the finished view model. Type lookups run one at
//! a time in the record's slot order. Any error ends the machine: no further
//! requests are handed out and no partial view model escapes.
//!
//! `fetch_details` is the blocking driver for callers that own a
//! `Transport`; the C ABI drives the same machine from the host side.

use tracing::{debug, warn};

use crate::client::PokeClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::locale::{self, LocaleConfig};
use crate::reference::parse_reference_id;
use crate::types::{PokemonDetails, PokemonRecord};

enum Stage {
    Pokemon,
    Types {
        record: PokemonRecord,
        names: Vec<String>,
    },
    Species {
        record: PokemonRecord,
        names: Vec<String>,
    },
    Finished,
}

enum Progress {
    Next(Stage, HttpRequest),
    Done(PokemonDetails),
}

/// One in-flight detail lookup.
pub struct DetailFetch {
    client: PokeClient,
    locale: LocaleConfig,
    id: u32,
    stage: Stage,
    pending: Option<HttpRequest>,
}

impl DetailFetch {
    /// Start a lookup for pokemon `id`. The first request is ready
    /// immediately via `next_request`.
    pub fn new(client: PokeClient, locale: LocaleConfig, id: u32) -> Result<Self, ApiError> {
        if id == 0 {
            return Err(ApiError::InvalidId(id));
        }
        let pending = client.build_get_pokemon(id);
        debug!(id, path = %pending.path, "detail fetch started");
        Ok(Self {
            client,
            locale,
            id,
            stage: Stage::Pokemon,
            pending: Some(pending),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The request whose response `feed` expects next, or `None` once the
    /// fetch has completed or failed.
    pub fn next_request(&self) -> Option<&HttpRequest> {
        self.pending.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Finished)
    }

    /// Consume the response to `next_request`.
    ///
    /// Returns `Ok(None)` when another request is pending and
    /// `Ok(Some(details))` when the lookup is complete.
    pub fn feed(&mut self, response: HttpResponse) -> Result<Option<PokemonDetails>, ApiError> {
        let stage = std::mem::replace(&mut self.stage, Stage::Finished);
        if matches!(stage, Stage::Finished) {
            return Err(ApiError::FetchComplete);
        }
        self.pending = None;

        match self.advance(stage, response) {
            Ok(Progress::Next(stage, request)) => {
                debug!(id = self.id, path = %request.path, "detail fetch requesting");
                self.stage = stage;
                self.pending = Some(request);
                Ok(None)
            }
            Ok(Progress::Done(details)) => {
                debug!(id = self.id, types = details.type_names.len(), "detail fetch complete");
                Ok(Some(details))
            }
            Err(e) => {
                warn!(id = self.id, error = %e, "detail fetch failed");
                Err(e)
            }
        }
    }

    fn advance(&self, stage: Stage, response: HttpResponse) -> Result<Progress, ApiError> {
        match stage {
            Stage::Pokemon => {
                let record = self.client.parse_pokemon(response)?;
                self.after_types(record, Vec::new())
            }
            Stage::Types { record, mut names } => {
                let info = self.client.parse_type(response)?;
                names.push(locale::select(&info.names, &self.locale.type_name)?);
                self.after_types(record, names)
            }
            Stage::Species { record, names } => {
                let species = self.client.parse_species(response)?;
                let flavor_text =
                    locale::select(&species.flavor_text_entries, &self.locale.flavor_text)?;
                let genus = locale::select(&species.genera, &self.locale.genus)?;
                Ok(Progress::Done(PokemonDetails {
                    id: self.id,
                    sprite_url: record.sprites.other.official_artwork.front_default,
                    type_names: names,
                    weight: record.weight,
                    genus,
                    flavor_text,
                }))
            }
            Stage::Finished => Err(ApiError::FetchComplete),
        }
    }

    /// Request the next unresolved type, or the species once every type
    /// name is in.
    fn after_types(&self, record: PokemonRecord, names: Vec<String>) -> Result<Progress, ApiError> {
        if let Some(slot) = record.types.get(names.len()) {
            let type_id = parse_reference_id(&slot.kind.url)?;
            let request = self.client.build_get_type(type_id);
            return Ok(Progress::Next(Stage::Types { record, names }, request));
        }
        let species_id = parse_reference_id(&record.species.url)?;
        let request = self.client.build_get_species(species_id);
        Ok(Progress::Next(Stage::Species { record, names }, request))
    }
}

/// Run a complete lookup for `id`, executing each request on `transport`.
pub fn fetch_details<T: Transport + ?Sized>(
    client: &PokeClient,
    locale: &LocaleConfig,
    transport: &T,
    id: u32,
) -> Result<PokemonDetails, ApiError> {
    let mut fetch = DetailFetch::new(client.clone(), locale.clone(), id)?;
    loop {
        let request = fetch.next_request().cloned().ok_or(ApiError::FetchComplete)?;
        let response = transport.execute(request)?;
        if let Some(details) = fetch.feed(response)? {
            return Ok(details);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    const BASE: &str = "http://pokeapi.test";

    /// Serves canned JSON by path and records every request it sees.
    #[derive(Default)]
    struct ScriptedTransport {
        routes: HashMap<String, (u16, String)>,
        seen: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn route(mut self, path: &str, status: u16, body: serde_json::Value) -> Self {
            self.routes
                .insert(format!("{BASE}{path}"), (status, body.to_string()));
            self
        }

        fn raw(mut self, path: &str, status: u16, body: &str) -> Self {
            self.routes
                .insert(format!("{BASE}{path}"), (status, body.to_string()));
            self
        }

        fn seen(&self) -> Vec<String> {
            self.seen
                .borrow()
                .iter()
                .map(|p| p.trim_start_matches(BASE).to_string())
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.path.clone());
            let (status, body) = self
                .routes
                .get(&request.path)
                .cloned()
                .unwrap_or((404, String::new()));
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }

    fn pokemon(id: u32, weight: u32, type_urls: &[&str], species_url: &str) -> serde_json::Value {
        let types: Vec<_> = type_urls
            .iter()
            .enumerate()
            .map(|(i, url)| json!({"slot": i + 1, "type": {"name": "", "url": url}}))
            .collect();
        json!({
            "id": id,
            "sprites": {"other": {"official-artwork": {"front_default": format!("https://img/{id}.png")}}},
            "types": types,
            "species": {"url": species_url},
            "weight": weight,
        })
    }

    fn type_info(names: &[(&str, &str)]) -> serde_json::Value {
        let names: Vec<_> = names
            .iter()
            .map(|(n, l)| json!({"name": n, "language": {"name": l}}))
            .collect();
        json!({ "names": names })
    }

    fn species(flavor: &[(&str, &str)], genera: &[(&str, &str)]) -> serde_json::Value {
        let flavor: Vec<_> = flavor
            .iter()
            .map(|(t, l)| json!({"flavor_text": t, "language": {"name": l}}))
            .collect();
        let genera: Vec<_> = genera
            .iter()
            .map(|(g, l)| json!({"genus": g, "language": {"name": l}}))
            .collect();
        json!({"flavor_text_entries": flavor, "genera": genera})
    }

    fn pikachu() -> ScriptedTransport {
        ScriptedTransport::default()
            .route(
                "/api/v2/pokemon/25",
                200,
                pokemon(25, 60, &["https://pokeapi.co/api/v2/type/13/"], "https://pokeapi.co/api/v2/pokemon-species/25/"),
            )
            .route(
                "/api/v2/type/13",
                200,
                type_info(&[("Electric", "en"), ("でんき", "ja-Hrkt")]),
            )
            .route(
                "/api/v2/pokemon-species/25",
                200,
                species(
                    &[("It stores electricity.", "en"), ("ほっぺたの りょうがわに でんきを ためる。", "ja")],
                    &[("Mouse Pokémon", "en"), ("ねずみポケモン", "ja-Hrkt")],
                ),
            )
    }

    fn run(transport: &ScriptedTransport, id: u32) -> Result<PokemonDetails, ApiError> {
        fetch_details(&PokeClient::new(BASE), &LocaleConfig::default(), transport, id)
    }

    #[test]
    fn pikachu_end_to_end() {
        let transport = pikachu();
        let details = run(&transport, 25).unwrap();
        assert_eq!(details.id, 25);
        assert_eq!(details.weight, 60);
        assert_eq!(details.type_names, vec!["でんき"]);
        assert_eq!(details.genus, "ねずみポケモン");
        assert_eq!(details.flavor_text, "ほっぺたの りょうがわに でんきを ためる。");
        assert_eq!(details.sprite_url, "https://img/25.png");
        assert_eq!(
            transport.seen(),
            vec!["/api/v2/pokemon/25", "/api/v2/type/13", "/api/v2/pokemon-species/25"]
        );
    }

    #[test]
    fn type_names_keep_slot_order() {
        let transport = ScriptedTransport::default()
            .route(
                "/api/v2/pokemon/722",
                200,
                pokemon(
                    722,
                    15,
                    &["https://pokeapi.co/api/v2/type/12/", "https://pokeapi.co/api/v2/type/3/"],
                    "https://pokeapi.co/api/v2/pokemon-species/722/",
                ),
            )
            .route("/api/v2/type/12", 200, type_info(&[("くさ", "ja-Hrkt")]))
            .route("/api/v2/type/3", 200, type_info(&[("ひこう", "ja-Hrkt")]))
            .route(
                "/api/v2/pokemon-species/722",
                200,
                species(&[("text", "ja")], &[("くさばねポケモン", "ja-Hrkt")]),
            );
        let details = run(&transport, 722).unwrap();
        assert_eq!(details.type_names, vec!["くさ", "ひこう"]);
        assert_eq!(transport.seen().len(), 4);
        assert_eq!(transport.seen()[1], "/api/v2/type/12");
        assert_eq!(transport.seen()[2], "/api/v2/type/3");
    }

    #[test]
    fn missing_flavor_locale_fails_without_details() {
        let transport = pikachu().route(
            "/api/v2/pokemon-species/25",
            200,
            species(&[("It stores electricity.", "en")], &[("ねずみポケモン", "ja-Hrkt")]),
        );
        let err = run(&transport, 25).unwrap_err();
        assert!(matches!(
            err,
            ApiError::LocalizationMissing { field: "flavor text", ref language } if language == "ja"
        ));
    }

    #[test]
    fn missing_genus_locale_fails_without_details() {
        let transport = pikachu().route(
            "/api/v2/pokemon-species/25",
            200,
            species(
                &[("ほっぺたの りょうがわに でんきを ためる。", "ja")],
                &[("Mouse Pokémon", "en")],
            ),
        );
        let err = run(&transport, 25).unwrap_err();
        assert!(matches!(
            err,
            ApiError::LocalizationMissing { field: "genus", ref language } if language == "ja-Hrkt"
        ));
    }

    #[test]
    fn missing_type_locale_stops_before_species() {
        let transport = pikachu().route("/api/v2/type/13", 200, type_info(&[("Electric", "en")]));
        let err = run(&transport, 25).unwrap_err();
        assert!(matches!(err, ApiError::LocalizationMissing { field: "type name", .. }));
        assert_eq!(transport.seen(), vec!["/api/v2/pokemon/25", "/api/v2/type/13"]);
    }

    #[test]
    fn malformed_type_reference_fails_before_request() {
        let transport = pikachu().route(
            "/api/v2/pokemon/25",
            200,
            pokemon(25, 60, &["https://pokeapi.co/api/v2/type/13"], "https://pokeapi.co/api/v2/pokemon-species/25/"),
        );
        let err = run(&transport, 25).unwrap_err();
        assert!(matches!(err, ApiError::MalformedReference { .. }));
        assert_eq!(transport.seen(), vec!["/api/v2/pokemon/25"]);
    }

    #[test]
    fn empty_species_body_is_not_found() {
        let transport = pikachu().raw("/api/v2/pokemon-species/25", 200, "");
        let err = run(&transport, 25).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref resource } if resource == "pokemon-species"));
    }

    #[test]
    fn unknown_pokemon_is_not_found() {
        let transport = pikachu();
        let err = run(&transport, 9999).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { ref resource } if resource == "pokemon"));
        assert_eq!(transport.seen().len(), 1);
    }

    #[test]
    fn zero_id_is_rejected_without_requests() {
        let transport = pikachu();
        let err = run(&transport, 0).unwrap_err();
        assert!(matches!(err, ApiError::InvalidId(0)));
        assert!(transport.seen().is_empty());
    }

    #[test]
    fn back_to_back_fetches_do_not_share_fields() {
        let transport = pikachu()
            .route(
                "/api/v2/pokemon/152",
                200,
                pokemon(152, 64, &["https://pokeapi.co/api/v2/type/12/"], "https://pokeapi.co/api/v2/pokemon-species/152/"),
            )
            .route("/api/v2/type/12", 200, type_info(&[("くさ", "ja-Hrkt")]))
            .route(
                "/api/v2/pokemon-species/152",
                200,
                species(&[("あたまの はっぱ。", "ja")], &[("はっぱポケモン", "ja-Hrkt")]),
            );
        let first = run(&transport, 25).unwrap();
        let second = run(&transport, 152).unwrap();
        assert_eq!(second.id, 152);
        assert_ne!(second.sprite_url, first.sprite_url);
        assert_ne!(second.weight, first.weight);
        assert_ne!(second.genus, first.genus);
        assert_ne!(second.flavor_text, first.flavor_text);
        assert!(second.type_names.iter().all(|n| !first.type_names.contains(n)));
    }

    #[test]
    fn machine_hands_out_nothing_after_failure() {
        let mut fetch = DetailFetch::new(PokeClient::new(BASE), LocaleConfig::default(), 25).unwrap();
        assert_eq!(fetch.id(), 25);
        assert!(fetch.next_request().is_some());
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "boom".to_string(),
        };
        assert!(matches!(fetch.feed(response), Err(ApiError::HttpError { status: 500, .. })));
        assert!(fetch.next_request().is_none());
        assert!(fetch.is_finished());

        let again = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "{}".to_string(),
        };
        assert!(matches!(fetch.feed(again), Err(ApiError::FetchComplete)));
    }

    #[test]
    fn machine_steps_through_each_request() {
        let transport = pikachu();
        let mut fetch = DetailFetch::new(PokeClient::new(BASE), LocaleConfig::default(), 25).unwrap();
        let mut steps = 0;
        let details = loop {
            let request = fetch.next_request().cloned().unwrap();
            steps += 1;
            if let Some(details) = fetch.feed(transport.execute(request).unwrap()).unwrap() {
                break details;
            }
            assert!(!fetch.is_finished());
        };
        assert_eq!(steps, 3);
        assert!(fetch.is_finished());
        assert!(fetch.next_request().is_none());
        assert_eq!(details.type_names, vec!["でんき"]);
    }

    #[test]
    fn custom_locale_selects_other_language() {
        let transport = pikachu();
        let locale = LocaleConfig {
            type_name: "en".to_string(),
            genus: "en".to_string(),
            flavor_text: "en".to_string(),
        };
        let details = fetch_details(&PokeClient::new(BASE), &locale, &transport, 25).unwrap();
        assert_eq!(details.type_names, vec!["Electric"]);
        assert_eq!(details.genus, "Mouse Pokémon");
        assert_eq!(details.flavor_text, "It stores electricity.");
    }
}
