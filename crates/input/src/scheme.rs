//! Hidden control scheme
//!
//! At the start of a game each action is bound to a distinct random letter.
//! The player is only told which actions exist; a binding is revealed the
//! first time its letter is pressed.

use arrayvec::ArrayVec;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{GameAction, LegendEntry};

/// Letters never dealt as bindings (driver keys and letters kept free).
pub const RESERVED_LETTERS: [char; 5] = ['F', 'M', 'P', 'Q', 'R'];

const SLOTS: usize = GameAction::ALL.len();

fn slot(action: GameAction) -> usize {
    match action {
        GameAction::MoveLeft => 0,
        GameAction::MoveRight => 1,
        GameAction::Rotate => 2,
        GameAction::SoftDrop => 3,
        GameAction::HardDrop => 4,
    }
}

/// Random letter bindings with per-action discovery state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlScheme {
    /// Uppercase letter per slot, in `GameAction::ALL` order
    keys: [char; SLOTS],
    discovered: [bool; SLOTS],
}

impl ControlScheme {
    /// Deal five distinct, non-reserved letters.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool: ArrayVec<char, 26> = ('A'..='Z')
            .filter(|ch| !RESERVED_LETTERS.contains(ch))
            .collect();
        pool.shuffle(rng);

        let mut keys = ['?'; SLOTS];
        keys.copy_from_slice(&pool[..SLOTS]);
        Self {
            keys,
            discovered: [false; SLOTS],
        }
    }

    /// Fixed bindings, in `GameAction::ALL` order.
    ///
    /// Returns `None` unless all five are distinct ASCII letters outside
    /// [`RESERVED_LETTERS`].
    pub fn from_keys(keys: [char; SLOTS]) -> Option<Self> {
        let mut upper = ['?'; SLOTS];
        for (i, ch) in keys.iter().enumerate() {
            let ch = ch.to_ascii_uppercase();
            if !ch.is_ascii_uppercase() || RESERVED_LETTERS.contains(&ch) || upper[..i].contains(&ch)
            {
                return None;
            }
            upper[i] = ch;
        }
        Some(Self {
            keys: upper,
            discovered: [false; SLOTS],
        })
    }

    /// Letter bound to `action` (uppercase)
    pub fn key_for(&self, action: GameAction) -> char {
        self.keys[slot(action)]
    }

    /// Action bound to `ch`, case-insensitive, without marking it discovered
    pub fn action_for(&self, ch: char) -> Option<GameAction> {
        let ch = ch.to_ascii_uppercase();
        GameAction::ALL
            .iter()
            .copied()
            .find(|&action| self.keys[slot(action)] == ch)
    }

    /// Resolve a pressed letter and reveal its binding.
    pub fn press(&mut self, ch: char) -> Option<GameAction> {
        let action = self.action_for(ch)?;
        self.discovered[slot(action)] = true;
        Some(action)
    }

    pub fn is_discovered(&self, action: GameAction) -> bool {
        self.discovered[slot(action)]
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().filter(|&&d| d).count()
    }

    /// Re-deal letters and forget every discovery.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::deal(rng);
    }

    /// Legend in `GameAction::ALL` order; undiscovered keys are `None`.
    pub fn legend(&self) -> ArrayVec<LegendEntry, SLOTS> {
        GameAction::ALL
            .iter()
            .map(|&action| LegendEntry {
                action,
                key: self
                    .is_discovered(action)
                    .then(|| self.key_for(action).to_string()),
            })
            .collect()
    }
}
