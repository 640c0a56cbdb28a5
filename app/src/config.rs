//! Command-line and environment configuration.

use clap::{Parser, Subcommand};
use pokedex_core::{LocaleConfig, PokeClient, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "pokedex", author, version, about, long_about = None)]
pub struct Args {
    /// PokeAPI deployment to query
    #[arg(long, env = "POKEDEX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Language code for type names
    #[arg(long, env = "POKEDEX_TYPE_LANGUAGE", default_value = "ja-Hrkt")]
    pub type_language: String,

    /// Language code for the genus label
    #[arg(long, env = "POKEDEX_GENUS_LANGUAGE", default_value = "ja-Hrkt")]
    pub genus_language: String,

    /// Language code for the flavor text
    #[arg(long, env = "POKEDEX_FLAVOR_LANGUAGE", default_value = "ja")]
    pub flavor_language: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the selectable pokemon
    List,
    /// Look up one pokemon and print its details
    Show {
        /// Display name from the list
        name: Option<String>,

        /// Pokédex id, bypassing the list
        #[arg(long, conflicts_with = "name")]
        id: Option<u32>,

        /// Print the details as JSON
        #[arg(long)]
        json: bool,
    },
    /// Pick pokemon from the list on stdin (default)
    Interactive,
}

impl Args {
    pub fn client(&self) -> PokeClient {
        PokeClient::new(&self.base_url)
    }

    pub fn locale(&self) -> LocaleConfig {
        LocaleConfig {
            type_name: self.type_language.clone(),
            genus: self.genus_language.clone(),
            flavor_text: self.flavor_language.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_public_api_and_japanese_locale() {
        let args = Args::try_parse_from(["pokedex"]).unwrap();
        assert_eq!(args.client().base_url(), "https://pokeapi.co");
        assert_eq!(args.locale(), LocaleConfig::default());
        assert!(args.command.is_none());
    }

    #[test]
    fn show_accepts_name_or_id() {
        let args = Args::try_parse_from(["pokedex", "show", "ワニノコ"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Show {
                name: Some("ワニノコ".to_string()),
                id: None,
                json: false
            })
        );

        let args = Args::try_parse_from(["pokedex", "show", "--id", "25", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Show {
                name: None,
                id: Some(25),
                json: true
            })
        );
    }

    #[test]
    fn show_rejects_name_and_id_together() {
        assert!(Args::try_parse_from(["pokedex", "show", "ワニノコ", "--id", "25"]).is_err());
    }

    #[test]
    fn locale_flags_override_defaults() {
        let args = Args::try_parse_from([
            "pokedex",
            "--base-url",
            "http://127.0.0.1:3000/",
            "--type-language",
            "en",
            "--flavor-language",
            "en",
            "list",
        ])
        .unwrap();
        assert_eq!(args.client().base_url(), "http://127.0.0.1:3000");
        let locale = args.locale();
        assert_eq!(locale.type_name, "en");
        assert_eq!(locale.genus, "ja-Hrkt");
        assert_eq!(locale.flavor_text, "en");
        assert_eq!(args.command, Some(Command::List));
    }
}
