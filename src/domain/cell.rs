//! Letter cells and the alphabet value mapping
//!
//! A cell carries a letter and its numeric value. Values start as the
//! 1-based alphabet position and grow as folds sum cells together; the
//! letter is always the value wrapped back into A..Z.

use serde::Serialize;

/// Number of letters in the alphabet used for wraparound
pub const ALPHABET_LEN: u64 = 26;

/// A single grid position
///
/// `value == 0` exactly when `ch` is `None`. `depth` counts how many folds
/// have merged into this cell and only drives layered display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    #[serde(rename = "char")]
    pub ch: Option<char>,
    pub value: u64,
    pub visible: bool,
    pub depth: u32,
}

impl Cell {
    /// An empty, visible padding cell
    pub fn empty() -> Self {
        Self {
            ch: None,
            value: 0,
            visible: true,
            depth: 0,
        }
    }

    /// Creates an unfolded cell for an uppercase ASCII letter
    ///
    /// Returns `None` for anything outside `A..=Z`.
    pub fn from_letter(letter: char) -> Option<Self> {
        value_of(letter).map(|value| Self {
            ch: Some(letter),
            value,
            visible: true,
            depth: 0,
        })
    }

    /// Merges two paired cells into the cell that survives a fold
    ///
    /// The sum is exact; only the displayed letter wraps.
    pub fn merged(a: &Cell, b: &Cell) -> Self {
        let combined = a.value.saturating_add(b.value);
        Self {
            ch: letter_of(combined),
            value: combined,
            visible: true,
            depth: a.depth.max(b.depth) + 1,
        }
    }

    /// Returns true if this cell has a letter
    pub fn is_letter(&self) -> bool {
        self.ch.is_some()
    }

    /// Returns the letter if the cell is visible and not empty
    pub fn visible_letter(&self) -> Option<char> {
        if self.visible { self.ch } else { None }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Maps an uppercase ASCII letter to its 1-based alphabet position
pub fn value_of(letter: char) -> Option<u64> {
    if letter.is_ascii_uppercase() {
        Some(u64::from(letter as u8 - b'A') + 1)
    } else {
        None
    }
}

/// Maps a value back to a letter, wrapping every 26
///
/// Zero is the empty cell.
pub fn letter_of(value: u64) -> Option<char> {
    if value == 0 {
        return None;
    }
    let normalized = ((value - 1) % ALPHABET_LEN) + 1;
    Some(char::from(b'A' + (normalized - 1) as u8))
}
