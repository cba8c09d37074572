//! Event bus for notifying the presentation layer.
//!
//! Stores stay silent; the reward, hotspot and navigation paths publish here
//! so a UI can play celebration sounds or pop up a "new sticker" banner.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use nile_common::{CollectibleKind, FactId, GameId, Location};

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player arrived at a location screen
    LocationVisited {
        /// Location arrived at
        location: Location,
    },
    /// A hotspot or god figure revealed its fact
    FactDiscovered {
        /// Namespaced fact ID
        fact: FactId,
    },
    /// A collectible was found for the first time
    CollectibleFound {
        /// Collectible family
        kind: CollectibleKind,
        /// Catalog ID
        id: String,
    },
    /// A mini-game reached its win condition
    GameCompleted {
        /// Finished game
        game: GameId,
    },
}

/// Queue of storybook notifications waiting for the UI.
///
/// The UI drains it once per frame. When it falls behind, the newest
/// notifications are discarded: the stores already hold the truth and a
/// missed banner is harmless.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Holds up to `capacity` undrained notifications.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Queues a notification. Returns false if the queue was full.
    pub fn publish(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(event = ?e.into_inner(), "Notification queue full");
                false
            },
        }
    }

    /// Takes every queued notification, oldest first.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Notifications not yet drained.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Queue size.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
