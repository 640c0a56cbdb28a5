//! Language selection for localized PokeAPI strings.

use crate::error::ApiError;
use crate::types::{FlavorText, Genus, LocalizedName};

/// Language codes the detail screen displays its text in.
///
/// Type names and genus use katakana/hiragana (`ja-Hrkt`), flavor text uses
/// the kanji-mixed `ja` entries; PokeAPI has no `ja-Hrkt` flavor text for
/// newer generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub type_name: String,
    pub genus: String,
    pub flavor_text: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            type_name: "ja-Hrkt".to_string(),
            genus: "ja-Hrkt".to_string(),
            flavor_text: "ja".to_string(),
        }
    }
}

/// An entry that carries a language tag and a display string.
pub trait Localized {
    /// Field name used in `LocalizationMissing` errors.
    const FIELD: &'static str;

    fn language(&self) -> &str;
    fn text(&self) -> &str;
}

impl Localized for LocalizedName {
    const FIELD: &'static str = "type name";

    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.name
    }
}

impl Localized for FlavorText {
    const FIELD: &'static str = "flavor text";

    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.flavor_text
    }
}

impl Localized for Genus {
    const FIELD: &'static str = "genus";

    fn language(&self) -> &str {
        &self.language.name
    }

    fn text(&self) -> &str {
        &self.genus
    }
}

/// Return the text of the first entry tagged `language`.
pub fn select<T: Localized>(entries: &[T], language: &str) -> Result<String, ApiError> {
    entries
        .iter()
        .find(|entry| entry.language() == language)
        .map(|entry| entry.text().to_string())
        .ok_or_else(|| ApiError::LocalizationMissing {
            field: T::FIELD,
            language: language.to_string(),
        })
}
