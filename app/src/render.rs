//! Text rendering of the selection list and the detail view.

use std::fmt::Write;

use pokedex_core::PokemonDetails;

use crate::screen::Screen;

/// The numbered selection list, with the current selection marked.
pub fn catalog(screen: &Screen) -> String {
    let mut out = String::new();
    for (i, starter) in screen.entries().iter().enumerate() {
        let marker = if i == screen.selected_index() { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>2}. {} (#{})", i + 1, starter.name, starter.id);
    }
    out
}

pub fn details(details: &PokemonDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Image: {}", details.sprite_url);
    let _ = writeln!(out, "Type:");
    for name in &details.type_names {
        let _ = writeln!(out, "・{name}");
    }
    let _ = writeln!(out, "Weight: {}", details.weight);
    let _ = writeln!(out, "Genus: {}", details.genus);
    let _ = writeln!(out, "{}", details.flavor_text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_lists_types_as_bullets() {
        let rendered = details(&PokemonDetails {
            id: 722,
            sprite_url: "https://img.test/722.png".to_string(),
            type_names: vec!["くさ".to_string(), "ひこう".to_string()],
            weight: 15,
            genus: "くさばねポケモン".to_string(),
            flavor_text: "はねを とばす。".to_string(),
        });
        assert_eq!(
            rendered,
            "Image: https://img.test/722.png\n\
             Type:\n\
             ・くさ\n\
             ・ひこう\n\
             Weight: 15\n\
             Genus: くさばねポケモン\n\
             はねを とばす。\n"
        );
    }

    #[test]
    fn catalog_marks_selection() {
        let mut screen = Screen::new();
        screen.select(1).unwrap();
        let rendered = catalog(&screen);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "   1. チコリータ (#152)");
        assert_eq!(lines[1], ">  2. ヒノアラシ (#155)");
        assert_eq!(lines[19], "  20. メッソン (#816)");
    }
}
