//! ID types for locations, mini-games, facts and collectibles.

use crate::error::ParseIdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four themed screens reachable from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// The Golden Pyramid.
    Pyramid,
    /// The Pharaoh's Palace.
    Palace,
    /// The Hieroglyphics Temple.
    Temple,
    /// The Nile Village.
    Village,
}

impl Location {
    /// Every location, in map order.
    pub const ALL: [Self; 4] = [Self::Pyramid, Self::Palace, Self::Temple, Self::Village];

    /// Returns the location tag used in storage and fact IDs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pyramid => "pyramid",
            Self::Palace => "palace",
            Self::Temple => "temple",
            Self::Village => "village",
        }
    }

    /// Returns the screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Pyramid => "The Golden Pyramid",
            Self::Palace => "The Pharaoh's Palace",
            Self::Temple => "The Hieroglyphics Temple",
            Self::Village => "The Nile Village",
        }
    }

    /// Returns the route path of the location screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Pyramid => "/pyramid",
            Self::Palace => "/palace",
            Self::Temple => "/temple",
            Self::Village => "/village",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| ParseIdError::new("location", s))
    }
}

/// Identifier of a mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameId {
    /// Stack blocks into a pyramid.
    PyramidBuilder,
    /// Memory game with the Egyptian gods.
    #[serde(rename = "match-gods")]
    MatchTheGods,
    /// Spell words with hieroglyphic stamps.
    SymbolStamp,
    /// Catch lotus flowers from a boat.
    #[serde(rename = "sail-nile")]
    SailTheNile,
}

impl GameId {
    /// Every mini-game.
    pub const ALL: [Self; 4] = [
        Self::PyramidBuilder,
        Self::MatchTheGods,
        Self::SymbolStamp,
        Self::SailTheNile,
    ];

    /// Returns the tag recorded in `gamesCompleted`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PyramidBuilder => "pyramid-builder",
            Self::MatchTheGods => "match-gods",
            Self::SymbolStamp => "symbol-stamp",
            Self::SailTheNile => "sail-nile",
        }
    }

    /// Returns the location hosting the game.
    #[must_use]
    pub const fn location(self) -> Location {
        match self {
            Self::PyramidBuilder => Location::Pyramid,
            Self::MatchTheGods => Location::Palace,
            Self::SymbolStamp => Location::Temple,
            Self::SailTheNile => Location::Village,
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|game| game.as_str() == s)
            .ok_or_else(|| ParseIdError::new("game", s))
    }
}

/// The three collectible families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    /// Unique treasures hidden around the map.
    Treasure,
    /// Badges earned by finishing mini-games.
    Badge,
    /// Stickers found at hotspots.
    Sticker,
}

impl CollectibleKind {
    /// Returns the family name used in snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Treasure => "treasure",
            Self::Badge => "badge",
            Self::Sticker => "sticker",
        }
    }
}

/// Namespaced identifier of a discovered fact, e.g. `"pyramid-blocks"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactId(String);

impl FactId {
    /// Creates a fact ID from a raw string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fact revealed by a hotspot: `"<location>-<hotspot>"`.
    #[must_use]
    pub fn hotspot(location: Location, hotspot: &str) -> Self {
        Self(format!("{}-{hotspot}", location.as_str()))
    }

    /// Fact revealed by one of the palace gods: `"palace-god-<god>"`.
    #[must_use]
    pub fn palace_god(god: &str) -> Self {
        Self(format!("{}-god-{god}", Location::Palace.as_str()))
    }

    /// Returns the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FactId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for FactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
