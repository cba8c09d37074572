//! Sail the Nile: steer a boat to catch falling lotus flowers for thirty
//! seconds.
//!
//! Coordinates are pixels of the game area with the origin at the top left.

use crate::minigame::{CompletionReport, GamePhase, MiniGame, PlayThrough, RewardContext};
use nile_common::GameId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Shortest accepted gap between spawns.
pub const MIN_SPAWN_INTERVAL: f32 = 0.2;

/// Tuning of the river game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SailConfig {
    /// Game area width in pixels.
    pub area_width: f32,
    /// Game area height in pixels.
    pub area_height: f32,
    /// Boat edge length.
    pub boat_size: f32,
    /// Gap between the boat and the bottom edge.
    pub boat_margin: f32,
    /// Falling object edge length.
    pub object_size: f32,
    /// Length of a round in seconds.
    pub duration: f32,
    /// Seconds between spawns.
    pub spawn_interval: f32,
    /// Probability that a spawned object is a lotus.
    pub lotus_chance: f32,
    /// Fall speed in pixels per second.
    pub fall_speed: f32,
    /// Distance moved by one keyboard nudge.
    pub nudge_step: f32,
}

impl Default for SailConfig {
    fn default() -> Self {
        Self {
            area_width: 300.0,
            area_height: 400.0,
            boat_size: 50.0,
            boat_margin: 10.0,
            object_size: 35.0,
            duration: 30.0,
            spawn_interval: 1.2,
            lotus_chance: 0.7,
            fall_speed: 80.0,
            nudge_step: 20.0,
        }
    }
}

impl SailConfig {
    /// Rightmost boat position.
    #[must_use]
    pub fn max_boat_x(&self) -> f32 {
        (self.area_width - self.boat_size).max(0.0)
    }

    /// Top edge of the boat.
    #[must_use]
    pub fn boat_top(&self) -> f32 {
        self.area_height - self.boat_size - self.boat_margin
    }
}

/// What floats down the river.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiverObjectKind {
    /// Worth a point.
    Lotus,
    /// Worth nothing.
    Hippo,
}

/// A falling object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiverObject {
    /// Unique within a round.
    pub id: u32,
    /// Lotus or hippo.
    pub kind: RiverObjectKind,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
}

/// Boat steering input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    /// Move left by one step.
    Left,
    /// Move right by one step.
    Right,
}

fn spans_overlap(a_start: f32, a_len: f32, b_start: f32, b_len: f32) -> bool {
    a_start < b_start + b_len && a_start + a_len > b_start
}

/// Sail the Nile game state.
#[derive(Debug)]
pub struct SailTheNile {
    play: PlayThrough,
    config: SailConfig,
    rng: fastrand::Rng,
    boat_x: f32,
    objects: Vec<RiverObject>,
    next_id: u32,
    score: u32,
    time_left: f32,
    spawn_timer: f32,
}

impl Default for SailTheNile {
    fn default() -> Self {
        Self::new(SailConfig::default())
    }
}

impl SailTheNile {
    /// Creates a round on the ready screen.
    #[must_use]
    pub fn new(config: SailConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Creates a round whose spawns come from a fixed seed.
    #[must_use]
    pub fn with_seed(config: SailConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(mut config: SailConfig, rng: fastrand::Rng) -> Self {
        // NaN also lands on the minimum.
        config.spawn_interval = config.spawn_interval.max(MIN_SPAWN_INTERVAL);
        Self {
            play: PlayThrough::new(GameId::SailTheNile),
            boat_x: config.max_boat_x() / 2.0,
            time_left: config.duration,
            config,
            rng,
            objects: Vec::new(),
            next_id: 0,
            score: 0,
            spawn_timer: 0.0,
        }
    }

    /// Active tuning.
    #[must_use]
    pub fn config(&self) -> &SailConfig {
        &self.config
    }

    /// Leaves the ready screen. No effect once started.
    pub fn start(&mut self) {
        if self.play.phase() == GamePhase::NotStarted {
            debug!(duration = self.config.duration, "River race started");
            self.play.begin();
        }
    }

    /// Moves the boat's left edge to `x`, clamped to the area.
    pub fn steer_to(&mut self, x: f32) {
        if self.play.phase() == GamePhase::InProgress {
            self.boat_x = x.clamp(0.0, self.config.max_boat_x());
        }
    }

    /// Moves the boat one step left or right.
    pub fn nudge(&mut self, direction: Nudge) {
        let step = match direction {
            Nudge::Left => -self.config.nudge_step,
            Nudge::Right => self.config.nudge_step,
        };
        self.steer_to(self.boat_x + step);
    }

    /// Left edge of the boat.
    #[must_use]
    pub fn boat_x(&self) -> f32 {
        self.boat_x
    }

    /// Objects currently on screen.
    #[must_use]
    pub fn objects(&self) -> &[RiverObject] {
        &self.objects
    }

    /// Lotus flowers caught.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    fn spawn(&mut self) {
        let kind = if self.rng.f32() < self.config.lotus_chance {
            RiverObjectKind::Lotus
        } else {
            RiverObjectKind::Hippo
        };
        let x = self.rng.f32() * (self.config.area_width - self.config.object_size).max(0.0);
        self.objects.push(RiverObject {
            id: self.next_id,
            kind,
            x,
            y: -self.config.object_size,
        });
        trace!(id = self.next_id, ?kind, x, "Spawned river object");
        self.next_id += 1;
    }

    fn fall(&mut self, dt: f32) {
        let SailConfig {
            area_height,
            boat_size,
            object_size,
            fall_speed,
            ..
        } = self.config;
        let boat_x = self.boat_x;
        let boat_top = self.config.boat_top();
        let mut caught = 0;

        self.objects.retain_mut(|object| {
            let from = object.y;
            object.y += fall_speed * dt;
            // The whole distance covered this tick counts, so long frames cannot skip the boat.
            let swept = object.y - from + object_size;
            if spans_overlap(object.x, object_size, boat_x, boat_size)
                && spans_overlap(from, swept, boat_top, boat_size)
            {
                if object.kind == RiverObjectKind::Lotus {
                    caught += 1;
                }
                return false;
            }
            object.y < area_height
        });
        self.score += caught;
    }
}

impl MiniGame for SailTheNile {
    fn id(&self) -> GameId {
        GameId::SailTheNile
    }

    fn phase(&self) -> GamePhase {
        self.play.phase()
    }

    fn reset(&mut self) {
        self.boat_x = self.config.max_boat_x() / 2.0;
        self.objects.clear();
        self.next_id = 0;
        self.score = 0;
        self.time_left = self.config.duration;
        self.spawn_timer = 0.0;
        self.play.reset();
    }

    fn tick(&mut self, dt: f32, ctx: &mut RewardContext<'_>) -> Option<CompletionReport> {
        if self.play.phase() != GamePhase::InProgress || dt <= 0.0 {
            return None;
        }

        self.fall(dt);
        self.spawn_timer += dt;
        while self.spawn_timer >= self.config.spawn_interval {
            self.spawn_timer -= self.config.spawn_interval;
            self.spawn();
        }

        self.time_left = (self.time_left - dt).max(0.0);
        if self.time_left > 0.0 {
            return None;
        }
        debug!(score = self.score, "River race finished");
        self.objects.clear();
        self.play.complete(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{badge, treasure, CollectibleCatalog};
    use crate::collection::CollectionStore;
    use crate::progress::ProgressStore;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn stores() -> (CollectionStore, ProgressStore) {
        let storage = Arc::new(MemoryStorage::new());
        (
            CollectionStore::new(CollectibleCatalog::EGYPT, storage.clone()),
            ProgressStore::new(storage),
        )
    }

    fn all_lotus() -> SailConfig {
        SailConfig {
            lotus_chance: 1.0,
            ..SailConfig::default()
        }
    }

    #[test]
    fn test_ready_screen_ignores_ticks_and_steering() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(SailConfig::default(), 1);

        game.steer_to(0.0);
        assert_eq!(game.boat_x(), 125.0);
        assert!(game.tick(40.0, &mut ctx).is_none());
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.time_left(), 30.0);
    }

    #[test]
    fn test_steering_clamps_to_area() {
        let mut game = SailTheNile::with_seed(SailConfig::default(), 1);
        game.start();
        game.steer_to(-40.0);
        assert_eq!(game.boat_x(), 0.0);
        game.nudge(Nudge::Left);
        assert_eq!(game.boat_x(), 0.0);
        game.nudge(Nudge::Right);
        assert_eq!(game.boat_x(), 20.0);
        game.steer_to(1000.0);
        assert_eq!(game.boat_x(), 250.0);
    }

    #[test]
    fn test_spawns_on_interval() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(SailConfig::default(), 2);
        game.start();

        game.tick(1.0, &mut ctx);
        assert!(game.objects().is_empty());
        game.tick(0.25, &mut ctx);
        assert_eq!(game.objects().len(), 1);
        let object = game.objects()[0];
        assert!(object.x >= 0.0 && object.x < 265.0);
        assert_eq!(object.y, -35.0);

        game.tick(0.5, &mut ctx);
        assert_eq!(game.objects()[0].y, 5.0);
    }

    #[test]
    fn test_catching_lotus_scores() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(all_lotus(), 3);
        game.start();
        game.tick(1.25, &mut ctx);

        let object = game.objects()[0];
        assert_eq!(object.kind, RiverObjectKind::Lotus);
        game.steer_to(object.x);
        // Boat top is at 340; the object reaches it after about 4.3 s.
        for _ in 0..10 {
            game.tick(0.5, &mut ctx);
            game.steer_to(object.x);
        }
        assert!(game.score() >= 1);
        assert!(game.objects().iter().all(|o| o.id != object.id));
    }

    #[test]
    fn test_missed_objects_leave_the_river() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let config = SailConfig {
            spawn_interval: 100.0,
            duration: 1000.0,
            ..all_lotus()
        };
        let mut game = SailTheNile::with_seed(config, 4);
        game.start();
        game.tick(100.0, &mut ctx);
        assert_eq!(game.objects().len(), 1);

        let object = game.objects()[0];
        let far = if object.x > 125.0 { 0.0 } else { 250.0 };
        game.steer_to(far);
        for _ in 0..12 {
            game.tick(0.5, &mut ctx);
        }
        assert!(game.objects().is_empty());
        assert_eq!(game.score(), 0);
    }

    fn single_drop(lotus_chance: f32) -> SailConfig {
        SailConfig {
            lotus_chance,
            spawn_interval: 100.0,
            duration: 1000.0,
            ..SailConfig::default()
        }
    }

    #[test]
    fn test_long_frame_still_catches() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(single_drop(1.0), 7);
        game.start();
        game.tick(100.0, &mut ctx);

        let object = game.objects()[0];
        game.steer_to(object.x);
        // One 5 s frame carries the lotus from above the river to past the boat.
        game.tick(5.0, &mut ctx);
        assert_eq!(game.score(), 1);
        assert!(game.objects().is_empty());
    }

    #[test]
    fn test_catching_hippo_is_neutral() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(single_drop(0.0), 8);
        game.start();
        game.tick(100.0, &mut ctx);

        let object = game.objects()[0];
        assert_eq!(object.kind, RiverObjectKind::Hippo);
        game.steer_to(object.x);
        for _ in 0..10 {
            game.tick(0.5, &mut ctx);
        }
        // Still above the bottom edge, so it left by being caught.
        assert!(game.objects().is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_non_positive_spawn_interval_is_raised() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        for interval in [0.0, -1.0, f32::NAN] {
            let config = SailConfig {
                spawn_interval: interval,
                ..SailConfig::default()
            };
            let mut game = SailTheNile::with_seed(config, 9);
            assert_eq!(game.config().spawn_interval, MIN_SPAWN_INTERVAL);
            game.start();
            assert!(game.tick(0.1, &mut ctx).is_none());
            assert!(game.tick(1.0, &mut ctx).is_none());
            assert!(game.objects().len() <= 6);
        }
    }

    #[test]
    fn test_completes_when_countdown_ends_regardless_of_score() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(SailConfig::default(), 5);
        game.start();
        game.steer_to(0.0);

        let mut reports = 0;
        for _ in 0..64 {
            if game.tick(0.5, &mut ctx).is_some() {
                reports += 1;
            }
        }
        assert_eq!(reports, 1);
        assert!(game.is_complete());
        assert_eq!(game.time_left(), 0.0);

        assert!(collection.has_badge(badge::RIVER_SAILOR));
        assert!(collection.has_treasure(treasure::NILE_PEARL));
        assert!(progress.has_completed_game("sail-nile"));
    }

    #[test]
    fn test_reset_returns_to_ready_screen() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = SailTheNile::with_seed(SailConfig::default(), 6);
        game.start();
        game.tick(5.0, &mut ctx);
        game.reset();

        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.score(), 0);
        assert!(game.objects().is_empty());
        assert_eq!(game.time_left(), 30.0);
        assert_eq!(game.boat_x(), 125.0);
    }
}
