//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use pokedex_core::error::ApiError;
use pokedex_core::http::HttpMethod;
use pokedex_core::{DetailFetch, LocaleConfig, PokeClient, PokemonDetails};

/// Opaque handle to a `PokeClient` plus the locale it displays in. C callers
/// receive a pointer to this and pass it back into every FFI function.
pub struct FfiPokedexClient {
    pub(crate) inner: PokeClient,
    pub(crate) locale: LocaleConfig,
}

/// Opaque handle to one in-flight detail lookup.
pub struct FfiDetailFetch {
    pub(crate) inner: DetailFetch,
}

/// Allocate a C string, dropping the content if it contains an interior NUL.
pub(crate) fn c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Handed out by `pokedex_fetch_next_request`. The host executes the
/// request and passes the response back through `pokedex_fetch_feed`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: pokedex_core::HttpRequest) -> *mut Self {
        let path = c_string(req.path);
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this on the stack after executing a request, then
/// passes a pointer to `pokedex_fetch_feed`. The FFI layer reads but does
/// not free these fields. A null `body` is treated as an empty body.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPokedexResult` and by catalog lookups.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    InvalidSelection = 4,
    InvalidId = 5,
    MalformedReference = 6,
    LocalizationMissing = 7,
    Transport = 8,
    FetchComplete = 9,
    Panic = 10,
    NullArg = 11,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::InvalidSelection(_) => FfiErrorCode::InvalidSelection,
            ApiError::InvalidId(_) => FfiErrorCode::InvalidId,
            ApiError::NotFound { .. } => FfiErrorCode::NotFound,
            ApiError::MalformedReference { .. } => FfiErrorCode::MalformedReference,
            ApiError::LocalizationMissing { .. } => FfiErrorCode::LocalizationMissing,
            ApiError::HttpError { .. } => FfiErrorCode::Http,
            ApiError::DeserializationError(_) => FfiErrorCode::Deserialization,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::FetchComplete => FfiErrorCode::FetchComplete,
        }
    }
}

/// Tag that tells `pokedex_free_result` what `FfiPokedexResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    /// The fetch accepted the response and has another request ready.
    Pending = 1,
    Details = 2,
}

/// The detail screen's view model exposed to C.
#[repr(C)]
pub struct FfiPokemonDetails {
    pub id: u32,
    pub sprite_url: *mut c_char,
    pub type_names: *mut *mut c_char,
    pub type_names_len: u32,
    pub weight: u32,
    pub genus: *mut c_char,
    pub flavor_text: *mut c_char,
}

impl FfiPokemonDetails {
    fn from_core(details: PokemonDetails) -> Box<Self> {
        let type_names_len = details.type_names.len() as u32;
        let type_names = if details.type_names.is_empty() {
            std::ptr::null_mut()
        } else {
            let names: Box<[*mut c_char]> = details.type_names.into_iter().map(c_string).collect();
            Box::into_raw(names) as *mut *mut c_char
        };
        Box::new(FfiPokemonDetails {
            id: details.id,
            sprite_url: c_string(details.sprite_url),
            type_names,
            type_names_len,
            weight: details.weight,
            genus: c_string(details.genus),
            flavor_text: c_string(details.flavor_text),
        })
    }
}

/// Result envelope for `pokedex_fetch_feed`.
///
/// On success `error_code` is `Ok` and `error_message` is null; `data_tag`
/// is `Pending` (with null `data`) while more requests remain, and
/// `Details` once `data` points to an `FfiPokemonDetails`.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiPokedexResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiPokedexResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiPokedexResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    /// The fetch needs another round-trip.
    pub(crate) fn pending() -> *mut Self {
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::Pending,
            std::ptr::null_mut(),
        )
    }

    /// Build a success result carrying the finished view model.
    pub(crate) fn ok_details(details: PokemonDetails) -> *mut Self {
        let data = Box::into_raw(FfiPokemonDetails::from_core(details));
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            0,
            FfiDataTag::Details,
            data as *mut std::ffi::c_void,
        )
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        // NotFound also covers empty 200 bodies, so only HttpError carries a status.
        let http_status = match &err {
            ApiError::HttpError { status, .. } => *status,
            _ => 0,
        };
        Self::boxed(
            FfiErrorCode::from(&err),
            c_string(err.to_string()),
            http_status,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg.to_string()),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}
