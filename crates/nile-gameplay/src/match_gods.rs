//! Match the Gods: a memory game with four pairs of god cards.

use crate::minigame::{fire_delay, CompletionReport, Delay, GamePhase, MiniGame, PlayThrough, RewardContext};
use nile_common::GameId;
use tracing::debug;

/// Seconds an unmatched pair stays face up.
pub const MISMATCH_DELAY: f32 = 1.0;

/// A god depicted on a pair of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct God {
    /// Card kind.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// The four gods of the deck.
pub const GODS: [God; 4] = [
    God { id: "ra", name: "Ra" },
    God {
        id: "anubis",
        name: "Anubis",
    },
    God {
        id: "thoth",
        name: "Thoth",
    },
    God {
        id: "bastet",
        name: "Bastet",
    },
];

/// One card on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// God shown on the face.
    pub god: God,
    /// Position in the unshuffled deck; tells the two cards of a pair apart.
    pub uid: usize,
}

/// Result of clicking a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Click had no effect.
    Ignored,
    /// First card of a guess turned over.
    Revealed,
    /// Second card matched the first.
    Matched,
    /// Second card differs; both hide after [`MISMATCH_DELAY`].
    Mismatched,
    /// Last pair matched.
    Completed(CompletionReport),
}

/// Match the Gods game state.
#[derive(Debug)]
pub struct MatchTheGods {
    play: PlayThrough,
    rng: fastrand::Rng,
    cards: Vec<Card>,
    flipped: Vec<usize>,
    matched: Vec<&'static str>,
    moves: u32,
    hide: Option<Delay<()>>,
}

impl Default for MatchTheGods {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchTheGods {
    /// Deals a freshly shuffled deck.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Deals a deck shuffled from a fixed seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(mut rng: fastrand::Rng) -> Self {
        let cards = deal(&mut rng);
        Self {
            play: PlayThrough::new(GameId::MatchTheGods),
            rng,
            cards,
            flipped: Vec::with_capacity(2),
            matched: Vec::with_capacity(GODS.len()),
            moves: 0,
            hide: None,
        }
    }

    /// Cards in table order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the card at `index` shows its face.
    #[must_use]
    pub fn is_face_up(&self, index: usize) -> bool {
        self.flipped.contains(&index)
            || self
                .cards
                .get(index)
                .is_some_and(|card| self.matched.contains(&card.god.id))
    }

    /// Cards flipped so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs found so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched.len()
    }

    /// Pairs in the deck.
    #[must_use]
    pub const fn total_pairs(&self) -> usize {
        GODS.len()
    }

    /// Turns over the card at `index`.
    pub fn flip(&mut self, index: usize, ctx: &mut RewardContext<'_>) -> FlipOutcome {
        if self.play.phase() == GamePhase::Complete
            || self.flipped.len() >= 2
            || self.flipped.contains(&index)
        {
            return FlipOutcome::Ignored;
        }
        let Some(card) = self.cards.get(index).copied() else {
            return FlipOutcome::Ignored;
        };
        if self.matched.contains(&card.god.id) {
            return FlipOutcome::Ignored;
        }

        self.play.begin();
        self.flipped.push(index);
        self.moves += 1;

        let &[first, second] = self.flipped.as_slice() else {
            return FlipOutcome::Revealed;
        };

        if self.cards[first].god.id != self.cards[second].god.id {
            self.hide = Some(Delay::new(MISMATCH_DELAY, ()));
            return FlipOutcome::Mismatched;
        }

        self.matched.push(card.god.id);
        self.flipped.clear();
        debug!(god = card.god.id, pairs = self.matched.len(), "Pair matched");

        if self.matched.len() < GODS.len() {
            return FlipOutcome::Matched;
        }
        self.play
            .complete(ctx)
            .map_or(FlipOutcome::Matched, FlipOutcome::Completed)
    }
}

impl MiniGame for MatchTheGods {
    fn id(&self) -> GameId {
        GameId::MatchTheGods
    }

    fn phase(&self) -> GamePhase {
        self.play.phase()
    }

    fn reset(&mut self) {
        self.cards = deal(&mut self.rng);
        self.flipped.clear();
        self.matched.clear();
        self.moves = 0;
        self.hide = None;
        self.play.reset();
    }

    fn tick(&mut self, dt: f32, _ctx: &mut RewardContext<'_>) -> Option<CompletionReport> {
        if fire_delay(&mut self.hide, dt).is_some() {
            self.flipped.clear();
        }
        None
    }
}

/// Two cards per god, uniformly shuffled.
fn deal(rng: &mut fastrand::Rng) -> Vec<Card> {
    let mut cards: Vec<Card> = GODS
        .iter()
        .chain(GODS.iter())
        .enumerate()
        .map(|(uid, god)| Card { god: *god, uid })
        .collect();
    rng.shuffle(&mut cards);
    cards
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

    fn pair_of(game: &MatchTheGods, god: &str) -> (usize, usize) {
        let positions: Vec<usize> = game
            .cards()
            .iter()
            .enumerate()
            .filter(|(_, card)| card.god.id == god)
            .map(|(i, _)| i)
            .collect();
        (positions[0], positions[1])
    }

    fn mismatched_pair(game: &MatchTheGods) -> (usize, usize) {
        let first = game.cards()[0].god.id;
        let other = game
            .cards()
            .iter()
            .position(|card| card.god.id != first)
            .expect("deck has four kinds");
        (0, other)
    }

    #[test]
    fn test_deck_has_two_of_each_god() {
        let game = MatchTheGods::with_seed(7);
        assert_eq!(game.cards().len(), 8);
        for god in GODS {
            assert_eq!(game.cards().iter().filter(|c| c.god == god).count(), 2);
        }
        assert_eq!(game.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_same_seed_same_deal() {
        assert_eq!(
            MatchTheGods::with_seed(42).cards(),
            MatchTheGods::with_seed(42).cards()
        );
    }

    #[test]
    fn test_completes_exactly_on_last_pair() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = MatchTheGods::with_seed(3);

        for (n, god) in GODS.iter().enumerate() {
            let (a, b) = pair_of(&game, god.id);
            assert_eq!(game.flip(a, &mut ctx), FlipOutcome::Revealed);
            let outcome = game.flip(b, &mut ctx);
            if n + 1 < GODS.len() {
                assert_eq!(outcome, FlipOutcome::Matched);
                assert_eq!(game.phase(), GamePhase::InProgress);
            } else {
                assert!(matches!(outcome, FlipOutcome::Completed(_)));
            }
            assert!(game.is_face_up(a) && game.is_face_up(b));
        }

        assert!(game.is_complete());
        assert_eq!(game.matched_pairs(), game.total_pairs());
        assert_eq!(game.moves(), 8);
        assert!(collection.has_badge(badge::GOD_MATCHER));
        assert!(collection.has_treasure(treasure::PHARAOH_RING));
        assert!(progress.has_completed_game("match-gods"));
    }

    #[test]
    fn test_mismatch_hides_after_delay() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = MatchTheGods::with_seed(11);
        let (a, b) = mismatched_pair(&game);

        game.flip(a, &mut ctx);
        assert_eq!(game.flip(b, &mut ctx), FlipOutcome::Mismatched);

        let third = (0..8).find(|i| *i != a && *i != b).expect("eight cards");
        assert_eq!(game.flip(third, &mut ctx), FlipOutcome::Ignored);

        game.tick(0.5, &mut ctx);
        assert!(game.is_face_up(a));
        game.tick(0.5, &mut ctx);
        assert!(!game.is_face_up(a));
        assert!(!game.is_face_up(b));
        assert_eq!(game.flip(third, &mut ctx), FlipOutcome::Revealed);
        assert_eq!(game.moves(), 3);
    }

    #[test]
    fn test_ignores_matched_and_repeated_cards() {
        let (mut collection, mut progress) = stores();
        let mut ctx = RewardContext::new(&mut collection, &mut progress);
        let mut game = MatchTheGods::with_seed(5);
        let (a, b) = pair_of(&game, "ra");

        game.flip(a, &mut ctx);
        assert_eq!(game.flip(a, &mut ctx), FlipOutcome::Ignored);
        game.flip(b, &mut ctx);
        assert_eq!(game.flip(b, &mut ctx), FlipOutcome::Ignored);
        assert_eq!(game.flip(99, &mut ctx), FlipOutcome::Ignored);
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn test_reset_reshuffles_and_keeps_rewards() {
        let (mut collection, mut progress) = stores();
        let mut game = MatchTheGods::with_seed(9);
        {
            let mut ctx = RewardContext::new(&mut collection, &mut progress);
            for god in GODS {
                let (a, b) = pair_of(&game, god.id);
                game.flip(a, &mut ctx);
                game.flip(b, &mut ctx);
            }
        }
        assert!(game.is_complete());

        game.reset();
        assert_eq!(game.phase(), GamePhase::NotStarted);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.matched_pairs(), 0);
        assert!((0..8).all(|i| !game.is_face_up(i)));
        assert!(collection.has_badge(badge::GOD_MATCHER));
        assert_eq!(collection.total_found(), 2);
    }
}
