//! The fixed list of pokemon offered by the selection control.

use crate::error::ApiError;

/// One selectable entry: the display name and its national Pokédex id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starter {
    pub name: &'static str,
    pub id: u32,
}

const fn starter(name: &'static str, id: u32) -> Starter {
    Starter { name, id }
}

/// Grass, fire and water starters of generations II through VIII, in
/// display order.
pub const STARTERS: &[Starter] = &[
    starter("チコリータ", 152),
    starter("ヒノアラシ", 155),
    starter("ワニノコ", 158),
    starter("キモリ", 252),
    starter("アチャモ", 255),
    starter("ミズゴロウ", 258),
    starter("ヒコザル", 387),
    starter("ポッチャマ", 390),
    starter("ツタージャ", 495),
    starter("ポカブ", 498),
    starter("ミジュマル", 501),
    starter("ハリマロン", 650),
    starter("フォッコ", 653),
    starter("ケロマツ", 656),
    starter("モクロー", 722),
    starter("ニャビー", 725),
    starter("アシマリ", 728),
    starter("サルノリ", 810),
    starter("ヒバニー", 813),
    starter("メッソン", 816),
];

/// Resolve a display name to its Pokédex id.
pub fn lookup(name: &str) -> Result<u32, ApiError> {
    STARTERS
        .iter()
        .find(|s| s.name == name)
        .map(|s| s.id)
        .ok_or_else(|| ApiError::InvalidSelection(name.to_string()))
}

/// Entry at `index` in display order.
pub fn get(index: usize) -> Option<Starter> {
    STARTERS.get(index).copied()
}
