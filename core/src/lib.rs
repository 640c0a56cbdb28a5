//! Sans-IO PokeAPI client core for the Pokédex detail screen.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The detail pipeline chains
//! the pokemon, type and species endpoints into a single `PokemonDetails`
//! view model.
//!
//! # Design
//! - `PokeClient` is stateless; it holds only `base_url`.
//! - `DetailFetch` is the pipeline as an explicit state machine, so a host
//!   (the CLI's `ureq` transport or a mobile app over the C ABI) decides
//!   where and when each request runs.
//! - Every failure is an `ApiError` variant; nothing panics on bad input.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod error;
pub mod http;
pub mod locale;
pub mod pipeline;
pub mod reference;
pub mod types;

pub use catalog::{Starter, STARTERS};
pub use client::{PokeClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use locale::LocaleConfig;
pub use pipeline::{fetch_details, DetailFetch};
pub use reference::parse_reference_id;
pub use types::{PokemonDetails, PokemonRecord, SpeciesInfo, TypeInfo};
