//! Map and location screens.
//!
//! Arriving at a location screen records the visit. Staying on the same
//! screen is not a new arrival.

use crate::events::{EventBus, GameEvent};
use crate::progress::ProgressStore;
use nile_common::Location;
use tracing::{debug, info};

/// What the player is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The Egypt map.
    #[default]
    Map,
    /// A location scene.
    Location(Location),
}

impl Screen {
    /// Route path of the screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Map => "/",
            Self::Location(location) => location.path(),
        }
    }

    /// Resolves a route path. Unknown paths fall back to the map.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Location::ALL
            .into_iter()
            .find(|l| l.path() == path)
            .map_or(Self::Map, Self::Location)
    }
}

/// A location button on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPin {
    /// Destination.
    pub location: Location,
    /// Label.
    pub name: &'static str,
    /// Icon.
    pub emoji: &'static str,
    /// Subtitle.
    pub description: &'static str,
    /// Horizontal position in percent of the map.
    pub x: u8,
    /// Vertical position in percent of the map.
    pub y: u8,
}

/// Pins in map order.
pub const MAP_PINS: [MapPin; 4] = [
    MapPin {
        location: Location::Pyramid,
        name: "The Golden Pyramid",
        emoji: "🔺",
        description: "Explore the ancient tomb!",
        x: 25,
        y: 55,
    },
    MapPin {
        location: Location::Palace,
        name: "Pharaoh's Palace",
        emoji: "👑",
        description: "Meet the Egyptian gods!",
        x: 70,
        y: 35,
    },
    MapPin {
        location: Location::Temple,
        name: "Hieroglyphics Temple",
        emoji: "📜",
        description: "See your name in symbols!",
        x: 55,
        y: 65,
    },
    MapPin {
        location: Location::Village,
        name: "Nile Village",
        emoji: "⛵",
        description: "Sail the magical river!",
        x: 75,
        y: 70,
    },
];

/// Tracks the active screen and records arrivals.
#[derive(Debug, Clone, Default)]
pub struct Router {
    screen: Screen,
}

impl Router {
    /// Starts on the map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Clicks a location on the map: marks it current, then goes there.
    ///
    /// Returns true if this was the first ever visit.
    pub fn select_location(
        &mut self,
        location: Location,
        progress: &mut ProgressStore,
        events: Option<&EventBus>,
    ) -> bool {
        progress.set_current_location(location.as_str());
        self.navigate(Screen::Location(location), progress, events)
    }

    /// Opens a route path, e.g. from a bookmark.
    pub fn open_path(&mut self, path: &str, progress: &mut ProgressStore, events: Option<&EventBus>) -> bool {
        match Screen::from_path(path) {
            Screen::Location(location) => self.select_location(location, progress, events),
            Screen::Map => {
                self.back_to_map();
                false
            },
        }
    }

    /// Switches screens. Arriving at a location records the visit once.
    ///
    /// Returns true if this was the first ever visit.
    pub fn navigate(&mut self, screen: Screen, progress: &mut ProgressStore, events: Option<&EventBus>) -> bool {
        if self.screen == screen {
            return false;
        }
        debug!(from = self.screen.path(), to = screen.path(), "Navigating");
        self.screen = screen;

        let Screen::Location(location) = screen else {
            return false;
        };
        if progress.has_visited(location.as_str()) {
            return false;
        }
        progress.visit_location(location.as_str());
        info!(%location, "First visit");
        if let Some(events) = events {
            events.publish(GameEvent::LocationVisited { location });
        }
        true
    }

    /// Returns to the map. The current location is left as it was.
    pub fn back_to_map(&mut self) {
        self.screen = Screen::Map;
    }
}
