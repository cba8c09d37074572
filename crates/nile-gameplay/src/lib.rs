//! # Nile Gameplay
//!
//! Gameplay state for the Egypt storybook adventure.
//!
//! This crate provides:
//! - The collectible catalog and the persisted collection store
//! - The persisted progress store (visits, completed games, facts)
//! - Storage backends (in-memory and one-file-per-key)
//! - Location hotspots, palace gods and the hieroglyph alphabet
//! - Map/location navigation with automatic visit tracking
//! - The mini-game completion contract and the four mini-games
//! - Event bus for reward and discovery notifications

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod collection;
pub mod events;
pub mod hieroglyphics;
pub mod hotspots;
pub mod match_gods;
pub mod minigame;
pub mod navigation;
pub mod progress;
pub mod pyramid_builder;
pub mod sail_nile;
pub mod storage;
pub mod symbol_stamp;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::collection::{
        percent, summarize, CollectionCommand, CollectionState, CollectionStore, CollectionSummary,
        Flag, COLLECTION_STORAGE_KEY,
    };
    pub use crate::events::*;
    pub use crate::hieroglyphics::*;
    pub use crate::hotspots::*;
    pub use crate::match_gods::*;
    pub use crate::minigame::*;
    pub use crate::navigation::*;
    pub use crate::progress::{ProgressCommand, ProgressState, ProgressStore, PROGRESS_STORAGE_KEY};
    pub use crate::pyramid_builder::*;
    pub use crate::sail_nile::*;
    pub use crate::storage::*;
    pub use crate::symbol_stamp::*;
}

pub use prelude::*;
