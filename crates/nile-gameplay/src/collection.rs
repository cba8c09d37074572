//! Collection tracking: treasures, badges and stickers.
//!
//! State transitions go through the pure [`reduce`] function; the
//! [`CollectionStore`] wrapper applies them and writes a snapshot after each
//! change. Completion totals are derived on read by [`summarize`].

use crate::catalog::{BadgeDef, CollectibleCatalog, StickerDef, TreasureDef};
use crate::storage::{read_snapshot, write_snapshot, StorageBackend};
use nile_common::{CollectibleKind, StorageError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key of the collection snapshot.
pub const COLLECTION_STORAGE_KEY: &str = "eilidh-egypt-collection";

/// Found/earned flag of one collectible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Whether the collectible has been found (or the badge earned).
    #[serde(alias = "earned")]
    pub found: bool,
}

impl Flag {
    const FOUND: Self = Self { found: true };
}

/// Found flags for every catalog entry, per family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionState {
    /// Treasure flags by ID.
    #[serde(default)]
    pub treasures: BTreeMap<String, Flag>,
    /// Badge flags by ID.
    #[serde(default)]
    pub badges: BTreeMap<String, Flag>,
    /// Sticker flags by ID.
    #[serde(default)]
    pub stickers: BTreeMap<String, Flag>,
}

impl CollectionState {
    /// Default state for a catalog: every entry present and unfound.
    #[must_use]
    pub fn new(catalog: &CollectibleCatalog) -> Self {
        let unfound = |kind| {
            catalog
                .ids(kind)
                .map(|id| (id.to_string(), Flag::default()))
                .collect()
        };
        Self {
            treasures: unfound(CollectibleKind::Treasure),
            badges: unfound(CollectibleKind::Badge),
            stickers: unfound(CollectibleKind::Sticker),
        }
    }

    /// Flags of one family.
    #[must_use]
    pub fn family(&self, kind: CollectibleKind) -> &BTreeMap<String, Flag> {
        match kind {
            CollectibleKind::Treasure => &self.treasures,
            CollectibleKind::Badge => &self.badges,
            CollectibleKind::Sticker => &self.stickers,
        }
    }

    fn family_mut(&mut self, kind: CollectibleKind) -> &mut BTreeMap<String, Flag> {
        match kind {
            CollectibleKind::Treasure => &mut self.treasures,
            CollectibleKind::Badge => &mut self.badges,
            CollectibleKind::Sticker => &mut self.stickers,
        }
    }

    /// Whether `id` is marked found; false for unknown IDs.
    #[must_use]
    pub fn is_found(&self, kind: CollectibleKind, id: &str) -> bool {
        self.family(kind).get(id).is_some_and(|flag| flag.found)
    }

    /// Lays a loaded snapshot over the catalog default.
    ///
    /// IDs the catalog does not know are dropped; catalog entries missing
    /// from the snapshot stay unfound.
    #[must_use]
    pub fn merged_onto(self, catalog: &CollectibleCatalog) -> Self {
        let mut merged = Self::new(catalog);
        for kind in [
            CollectibleKind::Treasure,
            CollectibleKind::Badge,
            CollectibleKind::Sticker,
        ] {
            let target = merged.family_mut(kind);
            for (id, flag) in self.family(kind) {
                match target.get_mut(id) {
                    Some(slot) => *slot = *flag,
                    None => debug!(kind = kind.as_str(), id = %id, "Dropping unknown collectible from snapshot"),
                }
            }
        }
        merged
    }
}

/// A collection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionCommand<'a> {
    /// Mark a treasure found.
    CollectTreasure(&'a str),
    /// Mark a badge earned.
    EarnBadge(&'a str),
    /// Mark a sticker found.
    CollectSticker(&'a str),
    /// Clear every flag.
    Reset,
}

/// Pure transition function.
///
/// Returns `None` when the command leaves the state unchanged: the ID is not
/// in the catalog family, or the flag is already set.
#[must_use]
pub fn reduce(
    catalog: &CollectibleCatalog,
    state: &CollectionState,
    command: CollectionCommand<'_>,
) -> Option<CollectionState> {
    let (kind, id) = match command {
        CollectionCommand::CollectTreasure(id) => (CollectibleKind::Treasure, id),
        CollectionCommand::EarnBadge(id) => (CollectibleKind::Badge, id),
        CollectionCommand::CollectSticker(id) => (CollectibleKind::Sticker, id),
        CollectionCommand::Reset => {
            let fresh = CollectionState::new(catalog);
            return (fresh != *state).then_some(fresh);
        },
    };

    if !catalog.contains(kind, id) || state.is_found(kind, id) {
        return None;
    }

    let mut next = state.clone();
    next.family_mut(kind).insert(id.to_string(), Flag::FOUND);
    Some(next)
}

/// Derived completion metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSummary {
    /// Found flags set across all families (catalog entries only).
    pub total_found: usize,
    /// Catalog size.
    pub total_possible: usize,
    /// `round(100 * total_found / total_possible)`, 0 for an empty catalog.
    pub progress: u8,
}

/// Computes the completion metrics of `state` against `catalog`.
#[must_use]
pub fn summarize(catalog: &CollectibleCatalog, state: &CollectionState) -> CollectionSummary {
    let total_found = [
        CollectibleKind::Treasure,
        CollectibleKind::Badge,
        CollectibleKind::Sticker,
    ]
    .into_iter()
    .map(|kind| catalog.ids(kind).filter(|id| state.is_found(kind, id)).count())
    .sum();
    let total_possible = catalog.total();

    CollectionSummary {
        total_found,
        total_possible,
        progress: percent(total_found, total_possible),
    }
}

/// Integer percentage rounded half up, 0 when `total` is 0.
#[must_use]
pub fn percent(found: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let found = found.min(total);
    ((200 * found + total) / (2 * total)) as u8
}

/// Authoritative holder of collectible flags.
pub struct CollectionStore {
    catalog: CollectibleCatalog,
    state: CollectionState,
    storage: Arc<dyn StorageBackend>,
}

impl fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionStore")
            .field("state", &self.state)
            .field("storage", &self.storage.name())
            .finish_non_exhaustive()
    }
}

impl CollectionStore {
    /// Creates a store holding the default state, without reading storage.
    #[must_use]
    pub fn new(catalog: CollectibleCatalog, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            state: CollectionState::new(&catalog),
            catalog,
            storage,
        }
    }

    /// Creates a store and restores the saved snapshot if there is one.
    ///
    /// Missing or corrupt snapshots leave the default state in place.
    #[must_use]
    pub fn load(catalog: CollectibleCatalog, storage: Arc<dyn StorageBackend>) -> Self {
        let mut store = Self::new(catalog, storage);
        match read_snapshot::<CollectionState>(store.storage.as_ref(), COLLECTION_STORAGE_KEY) {
            Ok(saved) => {
                store.state = saved.merged_onto(&store.catalog);
                info!(
                    found = store.total_found(),
                    "Restored collection from {}",
                    store.storage.name()
                );
            },
            Err(StorageError::NotFound(_)) => {
                debug!("No saved collection, starting fresh");
            },
            Err(e) => {
                warn!("Could not load saved collection: {e}");
            },
        }
        store
    }

    /// Marks a treasure found. Unknown IDs are ignored.
    pub fn collect_treasure(&mut self, id: &str) {
        self.dispatch(CollectionCommand::CollectTreasure(id));
    }

    /// Marks a badge earned. Unknown IDs are ignored.
    pub fn earn_badge(&mut self, id: &str) {
        self.dispatch(CollectionCommand::EarnBadge(id));
    }

    /// Marks a sticker found. Unknown IDs are ignored.
    pub fn collect_sticker(&mut self, id: &str) {
        self.dispatch(CollectionCommand::CollectSticker(id));
    }

    /// Marks any collectible found.
    pub fn collect(&mut self, kind: CollectibleKind, id: &str) {
        match kind {
            CollectibleKind::Treasure => self.collect_treasure(id),
            CollectibleKind::Badge => self.earn_badge(id),
            CollectibleKind::Sticker => self.collect_sticker(id),
        }
    }

    /// Whether a treasure has been found.
    #[must_use]
    pub fn has_treasure(&self, id: &str) -> bool {
        self.state.is_found(CollectibleKind::Treasure, id)
    }

    /// Whether a badge has been earned.
    #[must_use]
    pub fn has_badge(&self, id: &str) -> bool {
        self.state.is_found(CollectibleKind::Badge, id)
    }

    /// Whether a sticker has been found.
    #[must_use]
    pub fn has_sticker(&self, id: &str) -> bool {
        self.state.is_found(CollectibleKind::Sticker, id)
    }

    /// Whether any collectible has been found.
    #[must_use]
    pub fn has(&self, kind: CollectibleKind, id: &str) -> bool {
        self.state.is_found(kind, id)
    }

    /// Restores the default state and persists it.
    pub fn reset(&mut self) {
        if let Some(fresh) = reduce(&self.catalog, &self.state, CollectionCommand::Reset) {
            self.state = fresh;
        }
        info!("Collection reset");
        self.persist();
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    /// Catalog the store tracks.
    #[must_use]
    pub fn catalog(&self) -> &CollectibleCatalog {
        &self.catalog
    }

    /// Completion metrics.
    #[must_use]
    pub fn summary(&self) -> CollectionSummary {
        summarize(&self.catalog, &self.state)
    }

    /// Number of found collectibles.
    #[must_use]
    pub fn total_found(&self) -> usize {
        self.summary().total_found
    }

    /// Catalog size.
    #[must_use]
    pub fn total_possible(&self) -> usize {
        self.catalog.total()
    }

    /// Completion percentage, 0-100.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.summary().progress
    }

    /// Treasures with their found flags, in catalog order.
    pub fn treasures(&self) -> impl Iterator<Item = (&'static TreasureDef, bool)> + '_ {
        self.catalog
            .treasures
            .iter()
            .map(|t| (t, self.has_treasure(t.id)))
    }

    /// Badges with their earned flags, in catalog order.
    pub fn badges(&self) -> impl Iterator<Item = (&'static BadgeDef, bool)> + '_ {
        self.catalog.badges.iter().map(|b| (b, self.has_badge(b.id)))
    }

    /// Stickers with their found flags, in catalog order.
    pub fn stickers(&self) -> impl Iterator<Item = (&'static StickerDef, bool)> + '_ {
        self.catalog
            .stickers
            .iter()
            .map(|s| (s, self.has_sticker(s.id)))
    }

    fn dispatch(&mut self, command: CollectionCommand<'_>) {
        match reduce(&self.catalog, &self.state, command) {
            Some(next) => {
                debug!(?command, "Collection updated");
                self.state = next;
                self.persist();
            },
            None => debug!(?command, "Collection unchanged"),
        }
    }

    fn persist(&self) {
        if let Err(e) = write_snapshot(self.storage.as_ref(), COLLECTION_STORAGE_KEY, &self.state) {
            warn!("Could not save collection: {e}");
        }
    }
}
