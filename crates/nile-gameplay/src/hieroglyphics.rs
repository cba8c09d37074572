//! Simplified phonetic hieroglyph alphabet and the temple's
//! name-in-symbols feature.

use crate::catalog::treasure;
use crate::minigame::RewardContext;
use nile_common::CollectibleKind;
use tracing::info;

/// Name shown before the player types their own.
pub const DEFAULT_NAME: &str = "Eilidh";

/// One letter of the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hieroglyph {
    /// Lowercase latin letter.
    pub letter: char,
    /// Unicode hieroglyph(s).
    pub glyph: &'static str,
    /// Emoji stand-in for fonts without hieroglyphs.
    pub emoji: &'static str,
    /// What the symbol depicts.
    pub name: &'static str,
    /// How it sounds.
    pub sound: &'static str,
}

const fn sign(
    letter: char,
    glyph: &'static str,
    emoji: &'static str,
    name: &'static str,
    sound: &'static str,
) -> Hieroglyph {
    Hieroglyph {
        letter,
        glyph,
        emoji,
        name,
        sound,
    }
}

/// `a` through `z`.
pub const ALPHABET: [Hieroglyph; 26] = [
    sign('a', "\u{1313F}", "🦅", "vulture", "ah"),
    sign('b', "\u{130C0}", "🦶", "foot", "b"),
    sign('c', "\u{133A1}", "🧺", "basket", "k"),
    sign('d', "\u{130A7}", "✋", "hand", "d"),
    sign('e', "\u{131CB}", "🌾", "reed", "ee"),
    sign('f', "\u{13191}", "🐍", "viper", "f"),
    sign('g', "\u{133BC}", "🏺", "jar stand", "g"),
    sign('h', "\u{13254}", "🏠", "shelter", "h"),
    sign('i', "\u{131CB}", "🌾", "reed", "ee"),
    sign('j', "\u{13193}", "🐍", "snake", "j"),
    sign('k', "\u{133A1}", "🧺", "basket", "k"),
    sign('l', "\u{130ED}", "🦁", "lion", "l"),
    sign('m', "\u{13153}", "🦉", "owl", "m"),
    sign('n', "\u{13216}", "🌊", "water", "n"),
    sign('o', "\u{1336F}", "➰", "lasso", "oh"),
    sign('p', "\u{132AA}", "🪑", "stool", "p"),
    sign('q', "\u{13218}", "⛰️", "hill", "q"),
    sign('r', "\u{1308B}", "👄", "mouth", "r"),
    sign('s', "\u{132F4}", "🧣", "cloth", "s"),
    sign('t', "\u{133CF}", "🍞", "bread", "t"),
    sign('u', "\u{13171}", "🐦", "quail", "oo"),
    sign('v', "\u{13191}", "🐍", "viper", "v"),
    sign('w', "\u{13171}", "🐦", "quail", "w"),
    sign('x', "\u{133A1}\u{132F4}", "❌", "basket+cloth", "ks"),
    sign('y', "\u{131CB}\u{131CB}", "🌾🌾", "two reeds", "y"),
    sign('z', "\u{13283}", "🔒", "door bolt", "z"),
];

/// Looks up a letter, case-insensitively.
#[must_use]
pub fn glyph_for(letter: char) -> Option<&'static Hieroglyph> {
    let lower = letter.to_ascii_lowercase();
    if !lower.is_ascii_lowercase() {
        return None;
    }
    ALPHABET.get(usize::from(lower as u8 - b'a'))
}

/// Spells `name` in hieroglyphs, dropping everything that is not a latin
/// letter.
#[must_use]
pub fn name_to_glyphs(name: &str) -> Vec<&'static Hieroglyph> {
    name.chars().filter_map(glyph_for).collect()
}

/// A symbol with a meaning rather than a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialSymbol {
    /// Identifier.
    pub id: &'static str,
    /// Unicode glyph.
    pub glyph: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What it stands for.
    pub meaning: &'static str,
}

/// Symbols shown in the temple.
pub const SPECIAL_SYMBOLS: [SpecialSymbol; 4] = [
    SpecialSymbol {
        id: "ankh",
        glyph: "☥",
        name: "Ankh",
        meaning: "Life",
    },
    SpecialSymbol {
        id: "eyeOfHorus",
        glyph: "\u{13080}",
        name: "Eye of Horus",
        meaning: "Protection",
    },
    SpecialSymbol {
        id: "scarab",
        glyph: "\u{131A3}",
        name: "Scarab",
        meaning: "Rebirth",
    },
    SpecialSymbol {
        id: "sun",
        glyph: "\u{131F3}",
        name: "Sun Disc",
        meaning: "Ra the Sun God",
    },
];

/// Looks up a special symbol by ID.
#[must_use]
pub fn special_symbol(id: &str) -> Option<&'static SpecialSymbol> {
    SPECIAL_SYMBOLS.iter().find(|s| s.id == id)
}

/// Opens the name feature. The magic amulet is found on the first view.
///
/// Returns true if the amulet was new.
pub fn view_name_feature(ctx: &mut RewardContext<'_>) -> bool {
    let found = ctx.award(CollectibleKind::Treasure, treasure::MAGIC_AMULET);
    if found {
        info!("Magic amulet found in the temple");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CollectibleCatalog;
    use crate::collection::CollectionStore;
    use crate::progress::ProgressStore;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_alphabet_is_ordered() {
        for (i, sign) in ALPHABET.iter().enumerate() {
            assert_eq!(sign.letter as usize, 'a' as usize + i);
        }
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph_for('M').map(|g| g.name), Some("owl"));
        assert_eq!(glyph_for('x').map(|g| g.sound), Some("ks"));
        assert_eq!(glyph_for('e').map(|g| g.glyph), glyph_for('i').map(|g| g.glyph));
        assert!(glyph_for('3').is_none());
        assert!(glyph_for('é').is_none());
    }

    #[test]
    fn test_name_drops_non_letters() {
        let glyphs = name_to_glyphs("Ann-Marie 2");
        let letters: String = glyphs.iter().map(|g| g.letter).collect();
        assert_eq!(letters, "annmarie");
        assert!(name_to_glyphs("123 !?").is_empty());
        assert_eq!(name_to_glyphs(DEFAULT_NAME).len(), 6);
    }

    #[test]
    fn test_special_symbols() {
        assert_eq!(special_symbol("scarab").map(|s| s.meaning), Some("Rebirth"));
        assert!(special_symbol("sunDisc").is_none());
    }

    #[test]
    fn test_name_feature_awards_amulet_once() {
        let storage = Arc::new(MemoryStorage::new());
        let mut collection = CollectionStore::new(CollectibleCatalog::EGYPT, storage.clone());
        let mut progress = ProgressStore::new(storage);
        let mut ctx = RewardContext::new(&mut collection, &mut progress);

        assert!(view_name_feature(&mut ctx));
        assert!(!view_name_feature(&mut ctx));
        assert!(collection.has_treasure(treasure::MAGIC_AMULET));
        assert_eq!(collection.total_found(), 1);
    }
}
