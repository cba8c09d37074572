//! Pyramid Builder: drag six blocks into a three-tier pyramid.
//!
//! A block above the bottom row rests on two blocks: slot `s` of tier `n`
//! needs slots `s` and `s + 1` of tier `n - 1` filled first.

use crate::minigame::{CompletionReport, GamePhase, MiniGame, PlayThrough, RewardContext};
use nile_common::GameId;
use thiserror::Error;
use tracing::debug;

/// Slots per tier, bottom first.
pub const TIERS: [usize; 3] = [3, 2, 1];

/// Blocks in the tray, one per slot.
pub const TOTAL_BLOCKS: usize = 6;

/// Width of one slot in normalized game-area units.
const SLOT_WIDTH: f32 = 0.15;

/// Half the height of a tier row in normalized units.
const ROW_HALF_HEIGHT: f32 = 0.1;

/// A slot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    /// Tier, 0 = bottom.
    pub tier: usize,
    /// Slot within the tier, left to right.
    pub slot: usize,
}

impl SlotRef {
    /// Creates a slot reference.
    #[must_use]
    pub const fn new(tier: usize, slot: usize) -> Self {
        Self { tier, slot }
    }

    /// Whether the slot exists in [`TIERS`].
    #[must_use]
    pub fn in_bounds(self) -> bool {
        TIERS.get(self.tier).is_some_and(|&slots| self.slot < slots)
    }

    /// The two slots this one rests on, or `None` for the bottom tier.
    #[must_use]
    pub const fn supports(self) -> Option<[SlotRef; 2]> {
        if self.tier == 0 {
            return None;
        }
        Some([
            SlotRef::new(self.tier - 1, self.slot),
            SlotRef::new(self.tier - 1, self.slot + 1),
        ])
    }
}

/// Error types for block placement. State is unchanged when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The pyramid is already finished
    #[error("Pyramid already complete")]
    GameComplete,
    /// Block is not in the tray
    #[error("Block {0} is not available")]
    BlockUnavailable(usize),
    /// Drop point is not over any slot
    #[error("Drop point is outside every slot")]
    MissedSlot,
    /// Slot does not exist
    #[error("No slot at tier {} position {}", .0.tier, .0.slot)]
    OutOfBounds(SlotRef),
    /// Slot already holds a block
    #[error("Slot at tier {} position {} is occupied", .0.tier, .0.slot)]
    Occupied(SlotRef),
    /// Blocks below are missing
    #[error("Slot at tier {} position {} has no support", .0.tier, .0.slot)]
    Unsupported(SlotRef),
}

/// Successful placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Block placed; slots remain.
    Placed,
    /// Final block placed.
    Completed(CompletionReport),
}

/// A block sitting in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedBlock {
    /// Block ID from the tray.
    pub block: usize,
    /// Where it sits.
    pub at: SlotRef,
}

/// Maps a drop point in normalized game-area coordinates to a slot.
///
/// Rows are centred at `y = 0.7 - 0.2 * tier`; each tier is centred on
/// `x = 0.5`.
#[must_use]
pub fn slot_at(rel_x: f32, rel_y: f32) -> Option<SlotRef> {
    TIERS.iter().enumerate().find_map(|(tier, &slots)| {
        let row_y = 0.7 - tier as f32 * 0.2;
        if rel_y <= row_y - ROW_HALF_HEIGHT || rel_y >= row_y + ROW_HALF_HEIGHT {
            return None;
        }
        let start_x = 0.5 - slots as f32 * SLOT_WIDTH / 2.0;
        (0..slots)
            .find(|&slot| {
                let centre = start_x + slot as f32 * SLOT_WIDTH + SLOT_WIDTH / 2.0;
                (rel_x - centre).abs() < SLOT_WIDTH / 2.0
            })
            .map(|slot| SlotRef::new(tier, slot))
    })
}

/// Pyramid Builder game state.
#[derive(Debug, Clone)]
pub struct PyramidBuilder {
    play: PlayThrough,
    placed: Vec<PlacedBlock>,
    available: Vec<usize>,
}

impl Default for PyramidBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PyramidBuilder {
    /// Empty pyramid, full tray.
    #[must_use]
    pub fn new() -> Self {
        Self {
            play: PlayThrough::new(GameId::PyramidBuilder),
            placed: Vec::with_capacity(TOTAL_BLOCKS),
            available: (0..TOTAL_BLOCKS).collect(),
        }
    }

    /// Blocks still in the tray.
    #[must_use]
    pub fn available_blocks(&self) -> &[usize] {
        &self.available
    }

    /// Blocks in the pyramid, in placement order.
    #[must_use]
    pub fn placed_blocks(&self) -> &[PlacedBlock] {
        &self.placed
    }

    /// Whether a block occupies `at`.
    #[must_use]
    pub fn is_filled(&self, at: SlotRef) -> bool {
        self.placed.iter().any(|p| p.at == at)
    }

    /// Whether a block could be dropped on `at` right now.
    #[must_use]
    pub fn can_place(&self, at: SlotRef) -> bool {
        self.check_slot(at).is_ok()
    }

    fn check_slot(&self, at: SlotRef) -> Result<(), PlacementError> {
        if !at.in_bounds() {
            return Err(PlacementError::OutOfBounds(at));
        }
        if self.is_filled(at) {
            return Err(PlacementError::Occupied(at));
        }
        match at.supports() {
            Some(below) if !below.iter().all(|s| self.is_filled(*s)) => {
                Err(PlacementError::Unsupported(at))
            },
            _ => Ok(()),
        }
    }

    /// Puts `block` into the slot `at`.
    pub fn place(
        &mut self,
        block: usize,
        at: SlotRef,
        ctx: &mut RewardContext<'_>,
    ) -> Result<PlacementOutcome, PlacementError> {
        if self.play.phase() == GamePhase::Complete {
            return Err(PlacementError::GameComplete);
        }
        let tray_index = self
            .available
            .iter()
            .position(|&b| b == block)
            .ok_or(PlacementError::BlockUnavailable(block))?;
        self.check_slot(at)?;

        self.play.begin();
        self.available.remove(tray_index);
        self.placed.push(PlacedBlock { block, at });
        debug!(block, tier = at.tier, slot = at.slot, "Block placed");

        if self.placed.len() < TOTAL_BLOCKS {
            return Ok(PlacementOutcome::Placed);
        }
        Ok(self
            .play
            .complete(ctx)
            .map_or(PlacementOutcome::Placed, PlacementOutcome::Completed))
    }

    /// Drops `block` at a normalized point of the game area.
    pub fn drop_at(
        &mut self,
        block: usize,
        rel_x: f32,
        rel_y: f32,
        ctx: &mut RewardContext<'_>,
    ) -> Result<PlacementOutcome, PlacementError> {
        let at = slot_at(rel_x, rel_y).ok_or(PlacementError::MissedSlot)?;
        self.place(block, at, ctx)
    }
}

impl MiniGame for PyramidBuilder {
    fn id(&self) -> GameId {
        GameId::PyramidBuilder
    }

    fn phase(&self) -> GamePhase {
        self.play.phase()
    }

    fn reset(&mut self) {
        self.placed.clear();
        self.available = (0..TOTAL_BLOCKS).collect();
        self.play.reset();
    }

    fn tick(&mut self, _dt: f32, _ctx: &mut RewardContext<'_>) -> Option<CompletionReport> {
        None
    }
}
