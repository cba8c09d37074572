//! Exploration and completion history.

use crate::storage::{read_snapshot, write_snapshot, StorageBackend};
use nile_common::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key of the progress snapshot.
pub const PROGRESS_STORAGE_KEY: &str = "eilidh-egypt-progress";

/// Visited locations, finished games, discovered facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Location tags the player has arrived at.
    #[serde(default)]
    pub locations_visited: BTreeSet<String>,
    /// Mini-game tags that reached completion.
    #[serde(default)]
    pub games_completed: BTreeSet<String>,
    /// Namespaced fact IDs.
    #[serde(default)]
    pub facts_discovered: BTreeSet<String>,
    /// Most recently selected location. Not validated.
    #[serde(default)]
    pub current_location: Option<String>,
}

/// A progress mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCommand<'a> {
    /// Record a visit.
    VisitLocation(&'a str),
    /// Record a finished mini-game.
    CompleteGame(&'a str),
    /// Record a discovered fact.
    DiscoverFact(&'a str),
    /// Overwrite the current location.
    SetCurrentLocation(Option<&'a str>),
    /// Forget everything.
    Reset,
}

/// Pure transition function; `None` means the state is unchanged.
#[must_use]
pub fn reduce(state: &ProgressState, command: ProgressCommand<'_>) -> Option<ProgressState> {
    match command {
        ProgressCommand::VisitLocation(id) if !state.locations_visited.contains(id) => {
            Some(with_member(state, id, |s| &mut s.locations_visited))
        },
        ProgressCommand::CompleteGame(id) if !state.games_completed.contains(id) => {
            Some(with_member(state, id, |s| &mut s.games_completed))
        },
        ProgressCommand::DiscoverFact(id) if !state.facts_discovered.contains(id) => {
            Some(with_member(state, id, |s| &mut s.facts_discovered))
        },
        ProgressCommand::SetCurrentLocation(location)
            if state.current_location.as_deref() != location =>
        {
            Some(ProgressState {
                current_location: location.map(str::to_string),
                ..state.clone()
            })
        },
        ProgressCommand::Reset if *state != ProgressState::default() => Some(ProgressState::default()),
        _ => None,
    }
}

fn with_member(
    state: &ProgressState,
    member: &str,
    select: impl FnOnce(&mut ProgressState) -> &mut BTreeSet<String>,
) -> ProgressState {
    let mut next = state.clone();
    select(&mut next).insert(member.to_string());
    next
}

/// Authoritative holder of exploration history.
pub struct ProgressStore {
    state: ProgressState,
    storage: Arc<dyn StorageBackend>,
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressStore")
            .field("state", &self.state)
            .field("storage", &self.storage.name())
            .finish()
    }
}

impl ProgressStore {
    /// Creates a store holding the default state, without reading storage.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            state: ProgressState::default(),
            storage,
        }
    }

    /// Creates a store and restores the saved snapshot if there is one.
    #[must_use]
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let mut store = Self::new(storage);
        match read_snapshot::<ProgressState>(store.storage.as_ref(), PROGRESS_STORAGE_KEY) {
            Ok(saved) => {
                info!(
                    visited = saved.locations_visited.len(),
                    games = saved.games_completed.len(),
                    facts = saved.facts_discovered.len(),
                    "Restored progress from {}",
                    store.storage.name()
                );
                store.state = saved;
            },
            Err(StorageError::NotFound(_)) => debug!("No saved progress, starting fresh"),
            Err(e) => warn!("Could not load saved progress: {e}"),
        }
        store
    }

    /// Records a visit to a location.
    pub fn visit_location(&mut self, id: &str) {
        self.dispatch(ProgressCommand::VisitLocation(id));
    }

    /// Records a finished mini-game.
    pub fn complete_game(&mut self, id: &str) {
        self.dispatch(ProgressCommand::CompleteGame(id));
    }

    /// Records a discovered fact.
    pub fn discover_fact(&mut self, fact_id: &str) {
        self.dispatch(ProgressCommand::DiscoverFact(fact_id));
    }

    /// Overwrites the current location. Any value is accepted.
    pub fn set_current_location(&mut self, id: &str) {
        self.dispatch(ProgressCommand::SetCurrentLocation(Some(id)));
    }

    /// Clears the current location.
    pub fn clear_current_location(&mut self) {
        self.dispatch(ProgressCommand::SetCurrentLocation(None));
    }

    /// Whether a location has been visited.
    #[must_use]
    pub fn has_visited(&self, id: &str) -> bool {
        self.state.locations_visited.contains(id)
    }

    /// Whether a mini-game has been completed.
    #[must_use]
    pub fn has_completed_game(&self, id: &str) -> bool {
        self.state.games_completed.contains(id)
    }

    /// Whether a fact has been discovered.
    #[must_use]
    pub fn has_discovered_fact(&self, fact_id: &str) -> bool {
        self.state.facts_discovered.contains(fact_id)
    }

    /// Most recently selected location.
    #[must_use]
    pub fn current_location(&self) -> Option<&str> {
        self.state.current_location.as_deref()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Restores the default state and persists it.
    pub fn reset(&mut self) {
        if let Some(fresh) = reduce(&self.state, ProgressCommand::Reset) {
            self.state = fresh;
        }
        info!("Progress reset");
        self.persist();
    }

    fn dispatch(&mut self, command: ProgressCommand<'_>) {
        if let Some(next) = reduce(&self.state, command) {
            debug!(?command, "Progress updated");
            self.state = next;
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = write_snapshot(self.storage.as_ref(), PROGRESS_STORAGE_KEY, &self.state) {
            warn!("Could not save progress: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BrokenStorage, MemoryStorage};

    fn store() -> (ProgressStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (ProgressStore::new(storage.clone()), storage)
    }

    #[test]
    fn test_visit_is_idempotent() {
        let (mut store, _) = store();
        store.visit_location("pyramid");
        store.visit_location("pyramid");
        assert!(store.has_visited("pyramid"));
        assert_eq!(store.state().locations_visited.len(), 1);
    }

    #[test]
    fn test_reduce_repeat_insert_is_unchanged() {
        let state = reduce(&ProgressState::default(), ProgressCommand::CompleteGame("match-gods"))
            .expect("changed");
        assert!(reduce(&state, ProgressCommand::CompleteGame("match-gods")).is_none());
        assert!(reduce(&state, ProgressCommand::DiscoverFact("palace-crown")).is_some());
    }

    #[test]
    fn test_set_current_location_accepts_anything() {
        let (mut store, _) = store();
        store.set_current_location("atlantis");
        assert_eq!(store.current_location(), Some("atlantis"));
        assert!(!store.has_visited("atlantis"));
        store.clear_current_location();
        assert_eq!(store.current_location(), None);
    }

    #[test]
    fn test_queries() {
        let (mut store, _) = store();
        store.complete_game("sail-nile");
        store.discover_fact("village-hippo");
        assert!(store.has_completed_game("sail-nile"));
        assert!(!store.has_completed_game("match-gods"));
        assert!(store.has_discovered_fact("village-hippo"));
        assert!(!store.has_discovered_fact("village-crops"));
    }

    #[test]
    fn test_persists_and_reloads() {
        let (mut store, storage) = store();
        store.visit_location("temple");
        store.set_current_location("temple");
        store.discover_fact("temple-scribe");

        let reloaded = ProgressStore::load(storage);
        assert_eq!(reloaded.state(), store.state());
    }

    #[test]
    fn test_reset_restores_default_and_persists() {
        let (mut store, storage) = store();
        store.visit_location("village");
        store.reset();
        assert_eq!(store.state(), &ProgressState::default());

        let saved: ProgressState = read_snapshot(storage.as_ref(), PROGRESS_STORAGE_KEY).expect("saved");
        assert_eq!(saved, ProgressState::default());
    }

    #[test]
    fn test_reset_of_fresh_store_still_persists() {
        let (mut store, storage) = store();
        assert!(!storage.exists(PROGRESS_STORAGE_KEY));
        store.reset();
        assert!(storage.exists(PROGRESS_STORAGE_KEY));
        assert!(reduce(store.state(), ProgressCommand::Reset).is_none());
    }

    #[test]
    fn test_snapshot_uses_camel_case_arrays() {
        let (mut store, storage) = store();
        store.visit_location("palace");
        let raw = storage.read(PROGRESS_STORAGE_KEY).expect("saved");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["locationsVisited"], serde_json::json!(["palace"]));
        assert_eq!(value["currentLocation"], serde_json::Value::Null);
    }

    #[test]
    fn test_loads_snapshot_with_duplicates() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(
                PROGRESS_STORAGE_KEY,
                r#"{"locationsVisited":["pyramid","pyramid"],"gamesCompleted":[],"factsDiscovered":[],"currentLocation":"pyramid"}"#,
            )
            .expect("write");
        let store = ProgressStore::load(storage);
        assert_eq!(store.state().locations_visited.len(), 1);
        assert_eq!(store.current_location(), Some("pyramid"));
    }

    #[test]
    fn test_read_failure_falls_back_to_default() {
        let mut store = ProgressStore::load(Arc::new(BrokenStorage));
        assert_eq!(store.state(), &ProgressState::default());
        store.complete_game("symbol-stamp");
        assert!(store.has_completed_game("symbol-stamp"));
    }
}
