//! Static collectible catalog.
//!
//! Names and associations never change at runtime; only the found flags in
//! [`CollectionState`](crate::collection::CollectionState) do.

use nile_common::{CollectibleKind, GameId};

/// Treasure IDs.
pub mod treasure {
    /// Reward for building the pyramid.
    pub const GOLDEN_SCARAB: &str = "goldenScarab";
    /// Reward for matching the gods.
    pub const PHARAOH_RING: &str = "pharaohRing";
    /// Reward for viewing a name in hieroglyphics.
    pub const MAGIC_AMULET: &str = "magicAmulet";
    /// Reward for sailing the Nile.
    pub const NILE_PEARL: &str = "nilePearl";
    /// Hidden behind the sphinx hotspot.
    pub const HIDDEN_SPHINX: &str = "hiddenSphinx";
}

/// Badge IDs.
pub mod badge {
    /// Earned in Pyramid Builder.
    pub const PYRAMID_BUILDER: &str = "pyramidBuilder";
    /// Earned in Match the Gods.
    pub const GOD_MATCHER: &str = "godMatcher";
    /// Earned in Symbol Stamp.
    pub const SCRIBE_STAMP: &str = "scribeStamp";
    /// Earned in Sail the Nile.
    pub const RIVER_SAILOR: &str = "riverSailor";
}

/// Sticker IDs.
pub mod sticker {
    /// Bastet cat.
    pub const CAT: &str = "cat";
    /// Lotus flower.
    pub const LOTUS: &str = "lotus";
    /// Eye of Horus.
    pub const EYE_OF_HORUS: &str = "eyeOfHorus";
    /// Ankh symbol.
    pub const ANKH: &str = "ankh";
    /// Friendly crocodile.
    pub const CROCODILE: &str = "crocodile";
    /// Ibis bird.
    pub const IBIS: &str = "ibis";
    /// Sun disc. No hotspot awards it yet.
    pub const SUN_DISC: &str = "sunDisc";
    /// Papyrus plant.
    pub const PAPYRUS: &str = "papyrus";
}

/// A treasure entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasureDef {
    /// Catalog ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Location tag the treasure comes from (`"map"` for the overview).
    pub location: &'static str,
}

/// A badge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDef {
    /// Catalog ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Mini-game that awards it.
    pub game: GameId,
}

/// A sticker entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerDef {
    /// Catalog ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Location tags where the sticker may turn up.
    pub locations: &'static [&'static str],
}

const EGYPT_TREASURES: &[TreasureDef] = &[
    TreasureDef {
        id: treasure::GOLDEN_SCARAB,
        name: "Golden Scarab",
        location: "pyramid",
    },
    TreasureDef {
        id: treasure::PHARAOH_RING,
        name: "Pharaoh's Ring",
        location: "palace",
    },
    TreasureDef {
        id: treasure::MAGIC_AMULET,
        name: "Magic Amulet",
        location: "temple",
    },
    TreasureDef {
        id: treasure::NILE_PEARL,
        name: "Nile Pearl",
        location: "village",
    },
    TreasureDef {
        id: treasure::HIDDEN_SPHINX,
        name: "Hidden Sphinx",
        location: "map",
    },
];

const EGYPT_BADGES: &[BadgeDef] = &[
    BadgeDef {
        id: badge::PYRAMID_BUILDER,
        name: "Pyramid Builder",
        game: GameId::PyramidBuilder,
    },
    BadgeDef {
        id: badge::GOD_MATCHER,
        name: "God Matcher",
        game: GameId::MatchTheGods,
    },
    BadgeDef {
        id: badge::SCRIBE_STAMP,
        name: "Scribe's Stamp",
        game: GameId::SymbolStamp,
    },
    BadgeDef {
        id: badge::RIVER_SAILOR,
        name: "River Sailor",
        game: GameId::SailTheNile,
    },
];

const EGYPT_STICKERS: &[StickerDef] = &[
    StickerDef {
        id: sticker::CAT,
        name: "Bastet Cat",
        locations: &["palace", "village"],
    },
    StickerDef {
        id: sticker::LOTUS,
        name: "Lotus Flower",
        locations: &["village"],
    },
    StickerDef {
        id: sticker::EYE_OF_HORUS,
        name: "Eye of Horus",
        locations: &["temple"],
    },
    StickerDef {
        id: sticker::ANKH,
        name: "Ankh Symbol",
        locations: &["palace"],
    },
    StickerDef {
        id: sticker::CROCODILE,
        name: "Friendly Crocodile",
        locations: &["village"],
    },
    StickerDef {
        id: sticker::IBIS,
        name: "Ibis Bird",
        locations: &["temple"],
    },
    StickerDef {
        id: sticker::SUN_DISC,
        name: "Sun Disc",
        locations: &["map"],
    },
    StickerDef {
        id: sticker::PAPYRUS,
        name: "Papyrus Plant",
        locations: &["village"],
    },
];

/// The three disjoint collectible families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectibleCatalog {
    /// Treasures.
    pub treasures: &'static [TreasureDef],
    /// Badges.
    pub badges: &'static [BadgeDef],
    /// Stickers.
    pub stickers: &'static [StickerDef],
}

impl Default for CollectibleCatalog {
    fn default() -> Self {
        Self::EGYPT
    }
}

impl CollectibleCatalog {
    /// The storybook's catalog: 5 treasures, 4 badges, 8 stickers.
    pub const EGYPT: Self = Self {
        treasures: EGYPT_TREASURES,
        badges: EGYPT_BADGES,
        stickers: EGYPT_STICKERS,
    };

    /// Total number of collectibles across all families.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.treasures.len() + self.badges.len() + self.stickers.len()
    }

    /// IDs of one family, in catalog order.
    pub fn ids(&self, kind: CollectibleKind) -> Box<dyn Iterator<Item = &'static str>> {
        let Self {
            treasures,
            badges,
            stickers,
        } = *self;
        match kind {
            CollectibleKind::Treasure => Box::new(treasures.iter().map(|t| t.id)),
            CollectibleKind::Badge => Box::new(badges.iter().map(|b| b.id)),
            CollectibleKind::Sticker => Box::new(stickers.iter().map(|s| s.id)),
        }
    }

    /// Checks whether `id` belongs to the given family.
    #[must_use]
    pub fn contains(&self, kind: CollectibleKind, id: &str) -> bool {
        self.ids(kind).any(|known| known == id)
    }

    /// Looks up a treasure.
    #[must_use]
    pub fn treasure(&self, id: &str) -> Option<&'static TreasureDef> {
        self.treasures.iter().find(|t| t.id == id)
    }

    /// Looks up a badge.
    #[must_use]
    pub fn badge(&self, id: &str) -> Option<&'static BadgeDef> {
        self.badges.iter().find(|b| b.id == id)
    }

    /// Looks up a sticker.
    #[must_use]
    pub fn sticker(&self, id: &str) -> Option<&'static StickerDef> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Badge awarded by a mini-game, if any.
    #[must_use]
    pub fn badge_for_game(&self, game: GameId) -> Option<&'static BadgeDef> {
        self.badges.iter().find(|b| b.game == game)
    }
}
