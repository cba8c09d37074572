//! Clickable spots in each location and the facts behind them.
//!
//! Exploring a spot records its fact as `"<location>-<hotspot>"` and hands
//! out the spot's collectible if the player does not hold it yet.

use crate::catalog::{sticker, treasure};
use crate::events::GameEvent;
use crate::minigame::RewardContext;
use nile_common::{CollectibleKind, FactId, Location};
use tracing::debug;

/// Collectible waiting behind a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotReward {
    /// Treasure or sticker.
    pub kind: CollectibleKind,
    /// Catalog ID.
    pub id: &'static str,
}

/// A clickable spot in a location scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    /// Unique within its location.
    pub id: &'static str,
    /// Tooltip.
    pub label: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Shown when clicked.
    pub fact: &'static str,
    /// Horizontal position in percent of the scene.
    pub x: u8,
    /// Vertical position in percent of the scene.
    pub y: u8,
    /// Collectible found here, if any.
    pub reward: Option<HotspotReward>,
}

const fn spot(
    id: &'static str,
    label: &'static str,
    emoji: &'static str,
    position: (u8, u8),
    fact: &'static str,
) -> Hotspot {
    Hotspot {
        id,
        label,
        emoji,
        fact,
        x: position.0,
        y: position.1,
        reward: None,
    }
}

const fn with_sticker(spot: Hotspot, id: &'static str) -> Hotspot {
    Hotspot {
        reward: Some(HotspotReward {
            kind: CollectibleKind::Sticker,
            id,
        }),
        ..spot
    }
}

const fn with_treasure(spot: Hotspot, id: &'static str) -> Hotspot {
    Hotspot {
        reward: Some(HotspotReward {
            kind: CollectibleKind::Treasure,
            id,
        }),
        ..spot
    }
}

/// The Golden Pyramid.
pub const PYRAMID_HOTSPOTS: [Hotspot; 5] = [
    spot("blocks", "Stone blocks", "🧱", (35, 45), "The Great Pyramid has 2 million blocks!"),
    spot("workers", "Workers", "👷", (20, 70), "Thousands of workers built the pyramids!"),
    spot("tomb", "Peek inside", "⚱️", (50, 50), "Pharaohs were buried with their treasures!"),
    with_sticker(
        spot("cat", "Bastet the cat", "🐱", (70, 65), "Egyptians loved cats. They were sacred!"),
        sticker::CAT,
    ),
    with_treasure(
        spot("sphinx", "The Sphinx", "🦁", (85, 55), "The Sphinx has a lion body and human head!"),
        treasure::HIDDEN_SPHINX,
    ),
];

/// Pharaoh's Palace.
pub const PALACE_HOTSPOTS: [Hotspot; 3] = [
    spot("crown", "Royal Crown", "👑", (50, 25), "Pharaohs wore special crowns called nemes!"),
    with_sticker(
        spot("ankh", "Ankh Symbol", "☥", (15, 60), "The ankh means eternal life!"),
        sticker::ANKH,
    ),
    spot("feast", "Royal Feast", "🍇", (85, 75), "Pharaohs ate grapes, figs, and honey!"),
];

/// Hieroglyphics Temple.
pub const TEMPLE_HOTSPOTS: [Hotspot; 5] = [
    spot("scribe", "Scribe", "📝", (20, 55), "Scribes went to school for many years!"),
    spot("papyrus", "Papyrus", "📜", (80, 60), "Papyrus paper was made from river plants!"),
    spot("inkpot", "Ink pot", "🖋️", (30, 75), "Scribes wrote with brushes and black ink!"),
    with_sticker(
        spot("eyeOfHorus", "Eye of Horus", "👁️", (70, 30), "The Eye of Horus means protection!"),
        sticker::EYE_OF_HORUS,
    ),
    with_sticker(
        spot("ibis", "Ibis bird", "🦩", (85, 45), "Thoth the wisdom god has an ibis head!"),
        sticker::IBIS,
    ),
];

/// Nile Village.
pub const VILLAGE_HOTSPOTS: [Hotspot; 8] = [
    spot("fisherman", "Fishing", "🎣", (75, 45), "Egyptians caught fish from the Nile river!"),
    spot("crops", "Crops", "🌾", (20, 60), "The Nile floods helped crops grow!"),
    spot("toys", "Toys", "🎯", (35, 70), "Egyptian kids played with balls and dolls!"),
    with_sticker(
        spot("cat", "Pet cat", "🐱", (55, 75), "Every Egyptian family had pet cats!"),
        sticker::CAT,
    ),
    spot("hippo", "Hippo", "🦛", (85, 60), "Hippos lived in the Nile. They are big!"),
    with_sticker(
        spot("croc", "Crocodile", "🐊", (90, 75), "Crocodiles swam in the Nile river!"),
        sticker::CROCODILE,
    ),
    with_sticker(
        spot("lotus", "Lotus flower", "🪷", (70, 70), "Lotus flowers float on the Nile!"),
        sticker::LOTUS,
    ),
    with_sticker(
        spot("papyrus", "Papyrus plant", "🌿", (60, 55), "Papyrus plants grew by the river!"),
        sticker::PAPYRUS,
    ),
];

/// Hotspots of a location.
#[must_use]
pub fn hotspots(location: Location) -> &'static [Hotspot] {
    match location {
        Location::Pyramid => &PYRAMID_HOTSPOTS,
        Location::Palace => &PALACE_HOTSPOTS,
        Location::Temple => &TEMPLE_HOTSPOTS,
        Location::Village => &VILLAGE_HOTSPOTS,
    }
}

/// Looks up one hotspot.
#[must_use]
pub fn hotspot(location: Location, id: &str) -> Option<&'static Hotspot> {
    hotspots(location).iter().find(|h| h.id == id)
}

/// A god figure standing in the palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GodFigure {
    /// Identifier, shared with the matching game's cards.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Shown when clicked.
    pub fact: &'static str,
    /// Horizontal position in percent.
    pub x: u8,
    /// Vertical position in percent.
    pub y: u8,
}

/// Gods in the palace hall.
pub const PALACE_GODS: [GodFigure; 4] = [
    GodFigure {
        id: "ra",
        name: "Ra",
        emoji: "☀️",
        fact: "Ra is the sun god. He sails across the sky!",
        x: 25,
        y: 45,
    },
    GodFigure {
        id: "anubis",
        name: "Anubis",
        emoji: "🐕",
        fact: "Anubis has a jackal head. He guards tombs!",
        x: 45,
        y: 50,
    },
    GodFigure {
        id: "thoth",
        name: "Thoth",
        emoji: "🦅",
        fact: "Thoth is the god of writing and wisdom!",
        x: 65,
        y: 45,
    },
    GodFigure {
        id: "bastet",
        name: "Bastet",
        emoji: "🐱",
        fact: "Bastet is the cat goddess. Meow!",
        x: 80,
        y: 55,
    },
];

/// What a click revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Recorded fact.
    pub fact: FactId,
    /// Fact text to show.
    pub text: &'static str,
    /// First time this fact was seen.
    pub new_fact: bool,
    /// Collectible handed out by this click.
    pub found: Option<HotspotReward>,
}

/// Explores a hotspot. Returns `None` for an unknown ID.
pub fn explore_hotspot(
    location: Location,
    id: &str,
    ctx: &mut RewardContext<'_>,
) -> Option<Discovery> {
    let spot = hotspot(location, id)?;
    let fact = FactId::hotspot(location, spot.id);
    let new_fact = record_fact(&fact, ctx);
    let found = spot
        .reward
        .filter(|reward| ctx.award(reward.kind, reward.id));
    debug!(%fact, new_fact, ?found, "Hotspot explored");
    Some(Discovery {
        fact,
        text: spot.fact,
        new_fact,
        found,
    })
}

/// Clicks a god figure in the palace. Returns `None` for an unknown god.
pub fn meet_god(id: &str, ctx: &mut RewardContext<'_>) -> Option<Discovery> {
    let god = PALACE_GODS.iter().find(|g| g.id == id)?;
    let fact = FactId::palace_god(god.id);
    let new_fact = record_fact(&fact, ctx);
    debug!(%fact, new_fact, "Met a god");
    Some(Discovery {
        fact,
        text: god.fact,
        new_fact,
        found: None,
    })
}

fn record_fact(fact: &FactId, ctx: &mut RewardContext<'_>) -> bool {
    if ctx.progress().has_discovered_fact(fact.as_str()) {
        return false;
    }
    ctx.progress().discover_fact(fact.as_str());
    ctx.publish(GameEvent::FactDiscovered { fact: fact.clone() });
    true
}
