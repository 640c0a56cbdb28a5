//! Stateless HTTP request builder and response parser for PokeAPI.
//!
//! # Design
//! `PokeClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{PokemonRecord, SpeciesInfo, TypeInfo};

/// Base URL of the public PokeAPI deployment.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/";

/// Synchronous, stateless client for the three PokeAPI endpoints the detail
/// screen reads.
#[derive(Debug, Clone)]
pub struct PokeClient {
    base_url: String,
}

impl Default for PokeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PokeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_pokemon(&self, id: u32) -> HttpRequest {
        self.get(&format!("/api/v2/pokemon/{id}"))
    }

    pub fn build_get_type(&self, id: u32) -> HttpRequest {
        self.get(&format!("/api/v2/type/{id}"))
    }

    pub fn build_get_species(&self, id: u32) -> HttpRequest {
        self.get(&format!("/api/v2/pokemon-species/{id}"))
    }

    pub fn parse_pokemon(&self, response: HttpResponse) -> Result<PokemonRecord, ApiError> {
        parse_body(response, "pokemon")
    }

    pub fn parse_type(&self, response: HttpResponse) -> Result<TypeInfo, ApiError> {
        parse_body(response, "type")
    }

    pub fn parse_species(&self, response: HttpResponse) -> Result<SpeciesInfo, ApiError> {
        parse_body(response, "pokemon-species")
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Check the status, reject empty bodies, then deserialize.
fn parse_body<T: DeserializeOwned>(response: HttpResponse, resource: &str) -> Result<T, ApiError> {
    check_status(&response, resource)?;
    if response.body.trim().is_empty() {
        return Err(ApiError::NotFound {
            resource: resource.to_string(),
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, resource: &str) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound {
            resource: resource.to_string(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
