//! Symbol Stamp: spell short words by stamping hieroglyphs onto papyrus.

use crate::hieroglyphics::{glyph_for, Hieroglyph};
use crate::minigame::{fire_delay, CompletionReport, Delay, GamePhase, MiniGame, PlayThrough, RewardContext};
use nile_common::GameId;
use tracing::debug;

/// Pause after a correct word.
pub const SUCCESS_DELAY: f32 = 1.5;

/// Pause before a wrong attempt is wiped.
pub const RETRY_DELAY: f32 = 1.0;

/// Letters offered as distractors, in order of preference.
const DISTRACTORS: [char; 4] = ['m', 'n', 'p', 'r'];

/// A word to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampWord {
    /// Uppercase word.
    pub word: &'static str,
    /// Clue shown next to it.
    pub hint: &'static str,
}

/// Words in play order.
pub const WORDS: [StampWord; 3] = [
    StampWord {
        word: "CAT",
        hint: "Meow!",
    },
    StampWord {
        word: "SUN",
        hint: "It shines!",
    },
    StampWord {
        word: "BIRD",
        hint: "It flies!",
    },
];

/// A stamp on the papyrus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    /// Uppercase letter stamped.
    pub letter: char,
    /// Whether it matches the word at this position.
    pub correct: bool,
}

/// A button in the symbol tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraySymbol {
    /// Uppercase letter.
    pub letter: char,
    /// Its hieroglyph.
    pub glyph: &'static Hieroglyph,
}

/// Result of stamping a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampOutcome {
    /// Stamp refused.
    Ignored,
    /// Stamp placed; the word still has empty slots.
    Placed,
    /// Word spelled correctly; advancing after [`SUCCESS_DELAY`].
    WordSpelled,
    /// Word full but wrong; clearing after [`RETRY_DELAY`].
    WordWrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Advance,
    Retry,
}

/// Symbols offered for `word`: its distinct letters, then the first two
/// distractors not in it.
#[must_use]
pub fn available_symbols(word: &str) -> Vec<TraySymbol> {
    let word_letters: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
    let mut letters: Vec<char> = Vec::with_capacity(word_letters.len() + 2);
    let distractors = DISTRACTORS
        .iter()
        .copied()
        .filter(|d| !word_letters.contains(d))
        .take(2);
    for letter in word_letters.iter().copied().chain(distractors) {
        if !letters.contains(&letter) {
            letters.push(letter);
        }
    }
    letters
        .into_iter()
        .filter_map(|letter| {
            glyph_for(letter).map(|glyph| TraySymbol {
                letter: letter.to_ascii_uppercase(),
                glyph,
            })
        })
        .collect()
}

/// Symbol Stamp game state.
#[derive(Debug, Clone)]
pub struct SymbolStamp {
    play: PlayThrough,
    word_index: usize,
    placed: Vec<Stamp>,
    pending: Option<Delay<Resolution>>,
}

impl Default for SymbolStamp {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolStamp {
    /// Starts on the first word.
    #[must_use]
    pub fn new() -> Self {
        Self {
            play: PlayThrough::new(GameId::SymbolStamp),
            word_index: 0,
            placed: Vec::new(),
            pending: None,
        }
    }

    /// Word being spelled.
    #[must_use]
    pub fn current_word(&self) -> &'static StampWord {
        &WORDS[self.word_index.min(WORDS.len() - 1)]
    }

    /// Zero-based position in [`WORDS`].
    #[must_use]
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    /// Stamps on the papyrus so far.
    #[must_use]
    pub fn placed(&self) -> &[Stamp] {
        &self.placed
    }

    /// Symbols offered for the current word.
    #[must_use]
    pub fn tray(&self) -> Vec<TraySymbol> {
        available_symbols(self.current_word().word)
    }

    /// Whether a success or retry pause is running.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    /// Stamps `letter` into the next empty slot.
    pub fn stamp(&mut self, letter: char) -> StampOutcome {
        let target = self.current_word().word;
        if self.play.phase() == GamePhase::Complete
            || self.pending.is_some()
            || self.placed.len() >= target.len()
        {
            return StampOutcome::Ignored;
        }

        let letter = letter.to_ascii_uppercase();
        let expected = target.chars().nth(self.placed.len());
        self.play.begin();
        self.placed.push(Stamp {
            letter,
            correct: expected == Some(letter),
        });

        if self.placed.len() < target.len() {
            return StampOutcome::Placed;
        }
        if self.placed.iter().all(|s| s.correct) {
            debug!(word = target, "Word spelled");
            self.pending = Some(Delay::new(SUCCESS_DELAY, Resolution::Advance));
            StampOutcome::WordSpelled
        } else {
            debug!(word = target, "Word misspelled");
            self.pending = Some(Delay::new(RETRY_DELAY, Resolution::Retry));
            StampOutcome::WordWrong
        }
    }
}

impl MiniGame for SymbolStamp {
    fn id(&self) -> GameId {
        GameId::SymbolStamp
    }

    fn phase(&self) -> GamePhase {
        self.play.phase()
    }

    fn reset(&mut self) {
        self.word_index = 0;
        self.placed.clear();
        self.pending = None;
        self.play.reset();
    }

    fn tick(&mut self, dt: f32, ctx: &mut RewardContext<'_>) -> Option<CompletionReport> {
        match fire_delay(&mut self.pending, dt)? {
            Resolution::Retry => {
                self.placed.clear();
                None
            },
            Resolution::Advance if self.word_index + 1 < WORDS.len() => {
                self.word_index += 1;
                self.placed.clear();
                None
            },
            Resolution::Advance => self.play.complete(ctx),
        }
    }
}
