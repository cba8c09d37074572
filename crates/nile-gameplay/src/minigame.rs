//! Shared mini-game completion contract.
//!
//! Every mini-game owns a [`PlayThrough`] that moves through
//! `NotStarted -> InProgress -> Complete`. Reaching `Complete` hands out the
//! game's [`GameRewards`] through a [`RewardContext`] exactly once; resetting
//! only clears game-local state.

use crate::catalog::{badge, treasure};
use crate::collection::CollectionStore;
use crate::events::{EventBus, GameEvent};
use crate::progress::ProgressStore;
use nile_common::{CollectibleKind, GameId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Lifecycle phase of a mini-game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on a ready screen or for the first move.
    #[default]
    NotStarted,
    /// Being played.
    InProgress,
    /// Win condition reached; rewards granted.
    Complete,
}

/// What finishing a game awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRewards {
    /// Game recorded in `gamesCompleted`.
    pub game: GameId,
    /// Badge to earn.
    pub badge: Option<&'static str>,
    /// Treasure to collect.
    pub treasure: Option<&'static str>,
}

impl GameRewards {
    /// Reward table of the storybook's mini-games.
    #[must_use]
    pub const fn for_game(game: GameId) -> Self {
        let (badge_id, treasure_id) = match game {
            GameId::PyramidBuilder => (badge::PYRAMID_BUILDER, Some(treasure::GOLDEN_SCARAB)),
            GameId::MatchTheGods => (badge::GOD_MATCHER, Some(treasure::PHARAOH_RING)),
            GameId::SymbolStamp => (badge::SCRIBE_STAMP, None),
            GameId::SailTheNile => (badge::RIVER_SAILOR, Some(treasure::NILE_PEARL)),
        };
        Self {
            game,
            badge: Some(badge_id),
            treasure: treasure_id,
        }
    }
}

/// Write access to the stores, lent to a game for the duration of one input.
pub struct RewardContext<'a> {
    collection: &'a mut CollectionStore,
    progress: &'a mut ProgressStore,
    events: Option<&'a EventBus>,
}

impl<'a> RewardContext<'a> {
    /// Creates a context over both stores.
    pub fn new(collection: &'a mut CollectionStore, progress: &'a mut ProgressStore) -> Self {
        Self {
            collection,
            progress,
            events: None,
        }
    }

    /// Publishes reward events to `events`.
    #[must_use]
    pub fn with_events(mut self, events: &'a EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Collection store.
    pub fn collection(&mut self) -> &mut CollectionStore {
        self.collection
    }

    /// Progress store.
    pub fn progress(&mut self) -> &mut ProgressStore {
        self.progress
    }

    /// Publishes an event if a bus is attached.
    pub fn publish(&self, event: GameEvent) {
        if let Some(events) = self.events {
            events.publish(event);
        }
    }

    /// Collects `id` unless already held. Returns true if it was new.
    pub fn award(&mut self, kind: CollectibleKind, id: &str) -> bool {
        if self.collection.has(kind, id) {
            return false;
        }
        self.collection.collect(kind, id);
        let found = self.collection.has(kind, id);
        if found {
            self.publish(GameEvent::CollectibleFound {
                kind,
                id: id.to_string(),
            });
        }
        found
    }
}

/// Outcome of granting a game's rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionReport {
    /// Finished game.
    pub game: GameId,
    /// The badge was earned by this play-through.
    pub new_badge: bool,
    /// The treasure was found by this play-through.
    pub new_treasure: bool,
}

/// Hands out `rewards`: has-guarded badge and treasure, then one
/// `complete_game`.
pub fn grant_rewards(rewards: &GameRewards, ctx: &mut RewardContext<'_>) -> CompletionReport {
    let new_badge = rewards
        .badge
        .is_some_and(|id| ctx.award(CollectibleKind::Badge, id));
    let new_treasure = rewards
        .treasure
        .is_some_and(|id| ctx.award(CollectibleKind::Treasure, id));

    ctx.progress.complete_game(rewards.game.as_str());
    ctx.publish(GameEvent::GameCompleted { game: rewards.game });

    info!(game = %rewards.game, new_badge, new_treasure, "Mini-game complete");
    CompletionReport {
        game: rewards.game,
        new_badge,
        new_treasure,
    }
}

/// Phase tracking shared by every mini-game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayThrough {
    rewards: GameRewards,
    phase: GamePhase,
}

impl PlayThrough {
    /// Creates a play-through of `game` with its standard rewards.
    #[must_use]
    pub const fn new(game: GameId) -> Self {
        Self::with_rewards(GameRewards::for_game(game))
    }

    /// Creates a play-through with custom rewards.
    #[must_use]
    pub const fn with_rewards(rewards: GameRewards) -> Self {
        Self {
            rewards,
            phase: GamePhase::NotStarted,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Game being played.
    #[must_use]
    pub const fn game(&self) -> GameId {
        self.rewards.game
    }

    /// Moves `NotStarted` to `InProgress`; no effect otherwise.
    pub fn begin(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::InProgress;
        }
    }

    /// Enters `Complete` and grants the rewards.
    ///
    /// Returns `None` if this play-through already completed.
    pub fn complete(&mut self, ctx: &mut RewardContext<'_>) -> Option<CompletionReport> {
        if self.phase == GamePhase::Complete {
            return None;
        }
        self.phase = GamePhase::Complete;
        Some(grant_rewards(&self.rewards, ctx))
    }

    /// Back to `NotStarted`. Rewards already granted stay granted.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
    }
}

/// Common surface of the mini-games.
pub trait MiniGame {
    /// Game identifier.
    fn id(&self) -> GameId;

    /// Current phase.
    fn phase(&self) -> GamePhase;

    /// Clears game-local state back to the initial configuration.
    fn reset(&mut self);

    /// Advances timers by `dt` seconds.
    fn tick(&mut self, dt: f32, ctx: &mut RewardContext<'_>) -> Option<CompletionReport>;

    /// Whether the win condition has been reached.
    fn is_complete(&self) -> bool {
        self.phase() == GamePhase::Complete
    }
}

/// One-shot timer for delayed reveals and resets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay<A> {
    remaining: f32,
    action: A,
}

impl<A: Copy> Delay<A> {
    /// Schedules `action` after `seconds`.
    #[must_use]
    pub fn new(seconds: f32, action: A) -> Self {
        Self {
            remaining: seconds,
            action,
        }
    }

    /// Advances the timer; returns the action once it has elapsed.
    pub fn advance(&mut self, dt: f32) -> Option<A> {
        self.remaining -= dt;
        (self.remaining <= 0.0).then_some(self.action)
    }

    /// Pending action.
    #[must_use]
    pub fn action(&self) -> A {
        self.action
    }

    /// Seconds left.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

/// Ticks an optional delay, clearing it when it fires.
pub fn fire_delay<A: Copy>(pending: &mut Option<Delay<A>>, dt: f32) -> Option<A> {
    let action = pending.as_mut()?.advance(dt)?;
    *pending = None;
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CollectibleCatalog;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn stores() -> (CollectionStore, ProgressStore) {
        let storage = Arc::new(MemoryStorage::new());
        (
            CollectionStore::new(CollectibleCatalog::EGYPT, storage.clone()),
            ProgressStore::new(storage),
        )
    }

    #[test]
    fn test_reward_table() {
        let sail = GameRewards::for_game(GameId::SailTheNile);
        assert_eq!(sail.badge, Some(badge::RIVER_SAILOR));
        assert_eq!(sail.treasure, Some(treasure::NILE_PEARL));
        assert_eq!(GameRewards::for_game(GameId::SymbolStamp).treasure, None);
    }

    #[test]
    fn test_play_through_completes_once() {
        let (mut collection, mut progress) = stores();
        let bus = EventBus::default();
        let mut ctx = RewardContext::new(&mut collection, &mut progress).with_events(&bus);

        let mut play = PlayThrough::new(GameId::MatchTheGods);
        play.begin();
        assert_eq!(play.phase(), GamePhase::InProgress);

        let report = play.complete(&mut ctx).expect("first completion");
        assert!(report.new_badge);
        assert!(report.new_treasure);
        assert!(play.complete(&mut ctx).is_none());
        assert_eq!(play.phase(), GamePhase::Complete);

        let events = bus.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            GameEvent::GameCompleted {
                game: GameId::MatchTheGods
            }
        );

        assert!(collection.has_badge(badge::GOD_MATCHER));
        assert!(collection.has_treasure(treasure::PHARAOH_RING));
        assert!(progress.has_completed_game("match-gods"));
    }

    #[test]
    fn test_replay_keeps_rewards_and_reports_nothing_new() {
        let (mut collection, mut progress) = stores();
        let mut play = PlayThrough::new(GameId::PyramidBuilder);
        {
            let mut ctx = RewardContext::new(&mut collection, &mut progress);
            play.begin();
            play.complete(&mut ctx);
        }
        play.reset();
        assert_eq!(play.phase(), GamePhase::NotStarted);
        assert!(collection.has_badge(badge::PYRAMID_BUILDER));

        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        play.begin();
        let report = play.complete(&mut ctx).expect("second play-through");
        assert!(!report.new_badge);
        assert!(!report.new_treasure);
        assert_eq!(collection.total_found(), 2);
    }

    #[test]
    fn test_delay_fires_once_elapsed() {
        let mut pending = Some(Delay::new(1.0, 7u8));
        assert_eq!(fire_delay(&mut pending, 0.75), None);
        assert!(pending.is_some_and(|d| d.remaining() == 0.25 && d.action() == 7));
        assert_eq!(fire_delay(&mut pending, 0.25), Some(7));
        assert!(pending.is_none());
        assert_eq!(fire_delay(&mut pending, 5.0), None);
    }
}
