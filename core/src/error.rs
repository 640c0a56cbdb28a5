//! Error types for the Pokédex client and detail pipeline.
//!
//! # Design
//! Every step of the pipeline returns one of these variants instead of
//! panicking. `NotFound` covers both a 404 and a 200 with an empty body,
//! since either way there is nothing to display. All other non-2xx responses
//! land in `HttpError` with the raw status code and body for debugging.

use thiserror::Error;

/// Errors returned by `PokeClient` parse methods and the detail pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The chosen display name has no id in the selection catalog.
    #[error("no pokemon is mapped to selection {0:?}")]
    InvalidSelection(String),

    /// Pokédex ids start at 1.
    #[error("invalid pokemon id {0}")]
    InvalidId(u32),

    /// The server returned 404 or an empty body.
    #[error("resource not found: {resource}")]
    NotFound { resource: String },

    /// A cross-reference URL does not end in a `/<id>/` segment.
    #[error("reference url {url:?} has no trailing numeric id")]
    MalformedReference { url: String },

    /// No localized entry exists for the configured language code.
    #[error("no {field} entry for language {language:?}")]
    LocalizationMissing {
        field: &'static str,
        language: String,
    },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A response was fed to a pipeline that has already finished or failed.
    #[error("detail fetch already complete")]
    FetchComplete,
}
