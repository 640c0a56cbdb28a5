//! C-ABI wrapper around `pokedex-core`.
//!
//! # Overview
//! Lets a native host (the mobile detail screen) drive the detail fetch
//! pipeline while keeping all networking on its own side: the host asks for
//! the next request, executes it, and feeds the response back until the
//! view model comes out.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiPokedexResult` envelope with `FfiDataTag` + `void* data`
//!   conveys progress, the finished view model, and errors uniformly.
//! - The host owns all returned pointers and must call the matching
//!   `pokedex_*_free` / `pokedex_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use pokedex_core::http::HttpResponse;
use pokedex_core::{catalog, DetailFetch, LocaleConfig, PokeClient};

use types::*;

/// Borrow a C string as `&str`, or `None` if it is not valid UTF-8.
///
/// # Safety
/// `s` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`, displaying text in the default
/// Japanese locales.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs.
/// The caller must free the returned pointer with `pokedex_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_new(base_url: *const c_char) -> *mut FfiPokedexClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Some(url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        Box::into_raw(Box::new(FfiPokedexClient {
            inner: PokeClient::new(url),
            locale: LocaleConfig::default(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Override the language codes used for type names, genus and flavor text.
/// A null argument leaves that language unchanged.
///
/// Returns false, changing nothing, if `client` is null or any language
/// code is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_set_locale(
    client: *mut FfiPokedexClient,
    type_name: *const c_char,
    genus: *const c_char,
    flavor_text: *const c_char,
) -> bool {
    catch_unwind(|| {
        if client.is_null() {
            return false;
        }
        let mut parsed = [None, None, None];
        for (out, value) in parsed.iter_mut().zip([type_name, genus, flavor_text]) {
            if value.is_null() {
                continue;
            }
            match unsafe { borrow_str(value) } {
                Some(code) => *out = Some(code.to_string()),
                None => return false,
            }
        }
        let [type_name, genus, flavor_text] = parsed;
        let locale = &mut unsafe { &mut *client }.locale;
        if let Some(code) = type_name {
            locale.type_name = code;
        }
        if let Some(code) = genus {
            locale.genus = code;
        }
        if let Some(code) = flavor_text {
            locale.flavor_text = code;
        }
        true
    })
    .unwrap_or(false)
}

/// Free a client created by `pokedex_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_free(client: *mut FfiPokedexClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Selection catalog
// ---------------------------------------------------------------------------

/// Number of entries in the selection list.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_catalog_len() -> u32 {
    catalog::STARTERS.len() as u32
}

/// Display name of entry `index`, or null if out of range.
/// The caller must free the string with `pokedex_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_catalog_name(index: u32) -> *mut c_char {
    catch_unwind(|| match catalog::get(index as usize) {
        Some(starter) => c_string(starter.name.to_string()),
        None => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Pokédex id of entry `index`, or 0 if out of range.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_catalog_id(index: u32) -> u32 {
    catalog::get(index as usize).map_or(0, |s| s.id)
}

/// Resolve a display name to its Pokédex id, written to `out_id`.
///
/// Returns `InvalidSelection` if the name is not in the catalog and
/// `NullArg` if either pointer is null; `out_id` is untouched on failure.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_catalog_lookup(name: *const c_char, out_id: *mut u32) -> FfiErrorCode {
    catch_unwind(|| {
        if name.is_null() || out_id.is_null() {
            return FfiErrorCode::NullArg;
        }
        let Some(name) = (unsafe { borrow_str(name) }) else {
            return FfiErrorCode::InvalidSelection;
        };
        match catalog::lookup(name) {
            Ok(id) => {
                unsafe { *out_id = id };
                FfiErrorCode::Ok
            }
            Err(e) => FfiErrorCode::from(&e),
        }
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Detail fetch
// ---------------------------------------------------------------------------

/// Start a detail lookup for pokemon `id`.
///
/// Returns null if `client` is null or `id` is 0.
/// The caller must free the returned pointer with `pokedex_fetch_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_fetch_start(client: *const FfiPokedexClient, id: u32) -> *mut FfiDetailFetch {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match DetailFetch::new(client.inner.clone(), client.locale.clone(), id) {
            Ok(inner) => Box::into_raw(Box::new(FfiDetailFetch { inner })),
            Err(e) => {
                tracing::warn!(id, error = %e, "rejected detail fetch");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// The request the fetch is waiting on, or null once it has completed or
/// failed. The caller must free the returned pointer with
/// `pokedex_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_fetch_next_request(fetch: *const FfiDetailFetch) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if fetch.is_null() {
            return std::ptr::null_mut();
        }
        let fetch = unsafe { &*fetch };
        match fetch.inner.next_request() {
            Some(req) => FfiHttpRequest::from_core(req.clone()),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// an empty body; invalid UTF-8 is replaced so the payload still reaches the
/// parser instead of reading as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Feed the response to the request from `pokedex_fetch_next_request`.
///
/// Returns a result tagged `Pending` when another request is ready and
/// `Details` when the view model is complete.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_fetch_feed(
    fetch: *mut FfiDetailFetch,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if fetch.is_null() {
            return FfiPokedexResult::null_arg("fetch");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let fetch = unsafe { &mut *fetch };
        let resp = unsafe { &*response };
        match fetch.inner.feed(ffi_response_to_core(resp)) {
            Ok(None) => FfiPokedexResult::pending(),
            Ok(Some(details)) => FfiPokedexResult::ok_details(details),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_fetch_feed"))
}

/// Free a fetch created by `pokedex_fetch_start`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_fetch_free(fetch: *mut FfiDetailFetch) {
    if !fetch.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(fetch) });
        });
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a C string allocated by this library, ignoring null.
///
/// # Safety
/// `s` must come from `CString::into_raw` and not have been freed.
unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free an `FfiHttpRequest` returned by `pokedex_fetch_next_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.path);
            free_c_string(req.body);
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                unsafe {
                    free_c_string(h.key);
                    free_c_string(h.value);
                }
            }
        }
    });
}

/// Free an `FfiPokedexResult` returned by `pokedex_fetch_feed`.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_result(result: *mut FfiPokedexResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Details => {
                let details = unsafe { Box::from_raw(result.data as *mut FfiPokemonDetails) };
                free_ffi_details_fields(&details);
            }
            FfiDataTag::Pending | FfiDataTag::None => {}
        }
    });
}

/// Free the heap fields of an `FfiPokemonDetails` (but not the struct itself).
fn free_ffi_details_fields(details: &FfiPokemonDetails) {
    unsafe {
        free_c_string(details.sprite_url);
        free_c_string(details.genus);
        free_c_string(details.flavor_text);
    }
    if !details.type_names.is_null() && details.type_names_len > 0 {
        let names = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                details.type_names,
                details.type_names_len as usize,
            ))
        };
        for &name in names.iter() {
            unsafe { free_c_string(name) };
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
