//! Extract resource ids from PokeAPI cross-reference URLs.

use crate::error::ApiError;

/// Parse the id out of a reference URL such as
/// `https://pokeapi.co/api/v2/type/13/`.
///
/// PokeAPI always terminates resource URLs with `/`, so the id is the
/// second-to-last `/`-delimited token. A URL without the trailing slash
/// therefore fails: its second-to-last token is the resource kind.
pub fn parse_reference_id(url: &str) -> Result<u32, ApiError> {
    let malformed = || ApiError::MalformedReference {
        url: url.to_string(),
    };

    let mut tokens = url.rsplit('/');
    let last = tokens.next().ok_or_else(malformed)?;
    if !last.is_empty() {
        return Err(malformed());
    }
    let id: u32 = tokens
        .next()
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;
    if id == 0 {
        return Err(malformed());
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_yields_id() {
        assert_eq!(parse_reference_id("https://pokeapi.co/api/v2/type/4/").unwrap(), 4);
        assert_eq!(
            parse_reference_id("https://pokeapi.co/api/v2/pokemon-species/816/").unwrap(),
            816
        );
    }

    #[test]
    fn missing_trailing_slash_is_malformed() {
        let err = parse_reference_id("https://pokeapi.co/api/v2/type/4").unwrap_err();
        assert!(matches!(err, ApiError::MalformedReference { ref url } if url.ends_with("/type/4")));
    }

    #[test]
    fn non_numeric_segment_is_malformed() {
        let err = parse_reference_id("https://pokeapi.co/api/v2/type/electric/").unwrap_err();
        assert!(matches!(err, ApiError::MalformedReference { .. }));
    }

    #[test]
    fn zero_id_is_malformed() {
        let err = parse_reference_id("https://pokeapi.co/api/v2/type/0/").unwrap_err();
        assert!(matches!(err, ApiError::MalformedReference { .. }));
    }

    #[test]
    fn degenerate_inputs_are_malformed() {
        for url in ["", "/", "13", "//", "-1/"] {
            assert!(
                matches!(parse_reference_id(url), Err(ApiError::MalformedReference { .. })),
                "{url:?} should be malformed"
            );
        }
    }

    #[test]
    fn relative_reference_is_accepted() {
        assert_eq!(parse_reference_id("/api/v2/type/13/").unwrap(), 13);
    }
}
