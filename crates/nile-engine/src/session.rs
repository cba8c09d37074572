//! A play session: the stores, the router and the event bus wired together.

use crate::config::{EngineConfig, StorageKind};
use nile_common::Location;
use nile_gameplay::{
    explore_hotspot, meet_god, view_name_feature, CollectibleCatalog, CollectionStore, CompletionReport, Discovery,
    EventBus, FileStorage, GameEvent, MatchTheGods, MemoryStorage, MiniGame, ProgressStore, RewardContext, Router,
    SailTheNile, Screen, StorageBackend,
};
use std::sync::Arc;
use tracing::info;

/// Creates the snapshot backend selected by `config`.
#[must_use]
pub fn open_storage(config: &EngineConfig) -> Arc<dyn StorageBackend> {
    match config.storage {
        StorageKind::Memory => Arc::new(MemoryStorage::new()),
        StorageKind::File => Arc::new(FileStorage::new(config.resolved_save_dir())),
    }
}

/// Everything one player touches between launch and exit.
#[derive(Debug)]
pub struct GameSession {
    config: EngineConfig,
    collection: CollectionStore,
    progress: ProgressStore,
    router: Router,
    events: EventBus,
}

impl GameSession {
    /// Opens the configured backend and restores saved state.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let storage = open_storage(&config);
        Self::with_storage(config, storage)
    }

    /// Restores saved state from an explicit backend.
    #[must_use]
    pub fn with_storage(config: EngineConfig, storage: Arc<dyn StorageBackend>) -> Self {
        info!(backend = storage.name(), "Opening session");
        Self {
            collection: CollectionStore::load(CollectibleCatalog::EGYPT, storage.clone()),
            progress: ProgressStore::load(storage),
            router: Router::new(),
            events: EventBus::new(config.event_capacity),
            config,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Collection store.
    #[must_use]
    pub fn collection(&self) -> &CollectionStore {
        &self.collection
    }

    /// Progress store.
    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Active screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.router.screen()
    }

    /// Store access for a mini-game, publishing to the session's bus.
    pub fn reward_context(&mut self) -> RewardContext<'_> {
        RewardContext::new(&mut self.collection, &mut self.progress).with_events(&self.events)
    }

    /// Clicks a location on the map.
    pub fn select_location(&mut self, location: Location) -> bool {
        self.router
            .select_location(location, &mut self.progress, Some(&self.events))
    }

    /// Follows a route path.
    pub fn open_path(&mut self, path: &str) -> bool {
        self.router.open_path(path, &mut self.progress, Some(&self.events))
    }

    /// Leaves the location screen.
    pub fn back_to_map(&mut self) {
        self.router.back_to_map();
    }

    /// Clicks a hotspot of the location on screen.
    pub fn explore(&mut self, hotspot: &str) -> Option<Discovery> {
        let Screen::Location(location) = self.router.screen() else {
            return None;
        };
        explore_hotspot(location, hotspot, &mut self.reward_context())
    }

    /// Clicks a god figure. Only the palace has them.
    pub fn meet_god(&mut self, god: &str) -> Option<Discovery> {
        if self.router.screen() != Screen::Location(Location::Palace) {
            return None;
        }
        meet_god(god, &mut self.reward_context())
    }

    /// Opens the temple's name feature.
    pub fn view_name_feature(&mut self) -> bool {
        view_name_feature(&mut self.reward_context())
    }

    /// A shuffled deck, seeded from the configuration if a seed is set.
    #[must_use]
    pub fn match_the_gods(&self) -> MatchTheGods {
        self.config
            .rng_seed
            .map_or_else(MatchTheGods::new, MatchTheGods::with_seed)
    }

    /// A river round with the configured tuning.
    #[must_use]
    pub fn sail_the_nile(&self) -> SailTheNile {
        match self.config.rng_seed {
            Some(seed) => SailTheNile::with_seed(self.config.sail, seed),
            None => SailTheNile::new(self.config.sail),
        }
    }

    /// Advances a mini-game's timers.
    pub fn tick(&mut self, game: &mut dyn MiniGame, dt: f32) -> Option<CompletionReport> {
        game.tick(dt, &mut self.reward_context())
    }

    /// Takes the events published since the last call.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Forgets all collectibles and progress.
    pub fn reset_all(&mut self) {
        self.collection.reset();
        self.progress.reset();
        self.router.back_to_map();
        info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nile_gameplay::{badge, sticker, treasure, FlipOutcome, GamePhase, SymbolStamp, GODS};
    use tempfile::TempDir;

    fn memory_session() -> GameSession {
        let config = EngineConfig {
            storage: StorageKind::Memory,
            rng_seed: Some(1),
            ..EngineConfig::default()
        };
        GameSession::new(config)
    }

    #[test]
    fn test_explore_needs_a_location_screen() {
        let mut session = memory_session();
        assert!(session.explore("blocks").is_none());

        assert!(session.select_location(Location::Pyramid));
        let discovery = session.explore("blocks").expect("pyramid hotspot");
        assert_eq!(discovery.fact.as_str(), "pyramid-blocks");
        assert!(session.progress().has_discovered_fact("pyramid-blocks"));
        assert!(session.meet_god("ra").is_none());
    }

    #[test]
    fn test_palace_visit() {
        let mut session = memory_session();
        session.select_location(Location::Palace);
        session.explore("ankh");
        session.meet_god("bastet");

        assert!(session.collection().has_sticker(sticker::ANKH));
        assert!(session.progress().has_discovered_fact("palace-god-bastet"));
        assert!(session.progress().has_visited("palace"));
        assert_eq!(session.drain_events().len(), 4);
    }

    #[test]
    fn test_match_game_through_session() {
        let mut session = memory_session();
        let mut game = session.match_the_gods();

        for god in GODS {
            let positions: Vec<usize> = game
                .cards()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.god.id == god.id)
                .map(|(i, _)| i)
                .collect();
            let mut ctx = session.reward_context();
            game.flip(positions[0], &mut ctx);
            let outcome = game.flip(positions[1], &mut ctx);
            assert_ne!(outcome, FlipOutcome::Ignored);
        }

        assert!(game.is_complete());
        assert!(session.collection().has_badge(badge::GOD_MATCHER));
        assert!(session.collection().has_treasure(treasure::PHARAOH_RING));
    }

    #[test]
    fn test_tick_drives_delayed_completion() {
        let mut session = memory_session();
        let mut game = SymbolStamp::new();
        let mut report = None;
        for word in nile_gameplay::WORDS {
            for c in word.word.chars() {
                game.stamp(c);
            }
            report = session.tick(&mut game, 2.0);
        }
        assert!(report.is_some());
        assert_eq!(game.phase(), GamePhase::Complete);
        assert!(session.progress().has_completed_game("symbol-stamp"));
    }

    #[test]
    fn test_sail_round_uses_config() {
        let mut config = EngineConfig {
            storage: StorageKind::Memory,
            ..EngineConfig::default()
        };
        config.sail.duration = 10.0;
        let mut session = GameSession::new(config);
        let mut game = session.sail_the_nile();
        game.start();

        assert!(session.tick(&mut game, 5.0).is_none());
        assert!(session.tick(&mut game, 5.0).is_some());
        assert!(session.collection().has_treasure(treasure::NILE_PEARL));
    }

    #[test]
    fn test_file_session_survives_restart() {
        let temp_dir = TempDir::new().expect("temp dir");
        let config = EngineConfig {
            save_dir: Some(temp_dir.path().to_path_buf()),
            ..EngineConfig::default()
        };

        {
            let mut session = GameSession::new(config.clone());
            session.select_location(Location::Temple);
            session.view_name_feature();
        }

        let session = GameSession::new(config);
        assert!(session.progress().has_visited("temple"));
        assert_eq!(session.progress().current_location(), Some("temple"));
        assert!(session.collection().has_treasure(treasure::MAGIC_AMULET));
        assert_eq!(session.screen(), Screen::Map);
    }

    #[test]
    fn test_reset_all() {
        let mut session = memory_session();
        session.select_location(Location::Village);
        session.explore("lotus");
        session.reset_all();

        assert_eq!(session.collection().total_found(), 0);
        assert!(!session.progress().has_visited("village"));
        assert_eq!(session.screen(), Screen::Map);
    }
}
