//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed values (not raw strings) avoids
//! false negatives from field-ordering differences.

use pokedex_core::{
    parse_reference_id, ApiError, HttpMethod, HttpRequest, HttpResponse, PokeClient,
    PokemonRecord, SpeciesInfo, TypeInfo,
};
use serde::de::DeserializeOwned;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> PokeClient {
    PokeClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        other => panic!("unknown method: {other}"),
    }
}

/// Bodies are stored either as raw strings or as inline JSON objects.
fn simulated_response(sim: &serde_json::Value) -> HttpResponse {
    let body = match sim["body"].as_str() {
        Some(raw) => raw.to_string(),
        None => sim["body"].to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn assert_error_kind(name: &str, err: &ApiError, expected: &str) {
    let ok = match expected {
        "NotFound" => matches!(err, ApiError::NotFound { .. }),
        "HttpError" => matches!(err, ApiError::HttpError { .. }),
        "DeserializationError" => matches!(err, ApiError::DeserializationError(_)),
        "MalformedReference" => matches!(err, ApiError::MalformedReference { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(ok, "{name}: expected {expected}, got {err:?}");
}

/// Run every case of one endpoint's vector file.
fn run_vectors<T>(
    raw: &str,
    build: impl Fn(&PokeClient, u32) -> HttpRequest,
    parse: impl Fn(&PokeClient, HttpResponse) -> Result<T, ApiError>,
) where
    T: DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap() as u32;
        let expected_req = &case["expected_request"];

        // Verify build
        let req = build(&c, id);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = parse(&c, simulated_response(&case["simulated_response"]));

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_error_kind(name, &err, expected_error.as_str().unwrap());
        } else {
            let parsed = result.unwrap();
            let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        }
    }
}

#[test]
fn pokemon_test_vectors() {
    run_vectors::<PokemonRecord>(
        include_str!("../../test-vectors/pokemon.json"),
        PokeClient::build_get_pokemon,
        PokeClient::parse_pokemon,
    );
}

#[test]
fn type_test_vectors() {
    run_vectors::<TypeInfo>(
        include_str!("../../test-vectors/type.json"),
        PokeClient::build_get_type,
        PokeClient::parse_type,
    );
}

#[test]
fn species_test_vectors() {
    run_vectors::<SpeciesInfo>(
        include_str!("../../test-vectors/species.json"),
        PokeClient::build_get_species,
        PokeClient::parse_species,
    );
}

#[test]
fn reference_test_vectors() {
    let raw = include_str!("../../test-vectors/references.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = parse_reference_id(case["url"].as_str().unwrap());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_error_kind(name, &err, expected_error.as_str().unwrap());
        } else {
            let expected = case["expected_id"].as_u64().unwrap() as u32;
            assert_eq!(result.unwrap(), expected, "{name}: id");
        }
    }
}
