//! Letters, tile values and the tile supply.
//!
//! The supply is the 102-tile French set: 100 lettered tiles plus two
//! blanks. Blanks are written `?` while they sit in a rack or the bag and
//! take on a declared letter once placed.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The rack/bag character used for a blank tile.
pub const BLANK: char = '?';

/// `(letter, count, value)` for every tile kind in the supply.
pub const DISTRIBUTION: [(char, u32, u32); 27] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 3, 2),
    ('E', 15, 1),
    ('F', 2, 4),
    ('G', 2, 2),
    ('H', 2, 4),
    ('I', 8, 1),
    ('J', 1, 8),
    ('K', 1, 10),
    ('L', 5, 1),
    ('M', 3, 2),
    ('N', 6, 1),
    ('O', 6, 1),
    ('P', 2, 3),
    ('Q', 1, 8),
    ('R', 6, 1),
    ('S', 6, 1),
    ('T', 6, 1),
    ('U', 6, 1),
    ('V', 2, 4),
    ('W', 1, 10),
    ('X', 1, 10),
    ('Y', 1, 10),
    ('Z', 1, 10),
    (BLANK, 2, 0),
];

/// Total number of tiles in a fresh supply.
pub fn supply_size() -> u32 {
    DISTRIBUTION.iter().map(|&(_, count, _)| count).sum()
}

/// Point value of a rack letter (`?` is worth 0).
///
/// Returns `None` for characters that are not part of the supply.
pub fn value_of(letter: char) -> Option<u32> {
    DISTRIBUTION
        .iter()
        .find(|&&(l, _, _)| l == letter)
        .map(|&(_, _, value)| value)
}

/// Index of a rack letter into [`DISTRIBUTION`].
pub(crate) fn index_of(letter: char) -> Option<usize> {
    DISTRIBUTION.iter().position(|&(l, _, _)| l == letter)
}

/// Returns `true` for `A`..=`Z` and the blank.
pub fn is_rack_letter(c: char) -> bool {
    c == BLANK || c.is_ascii_uppercase()
}

/// A tile sitting on the board.
///
/// `letter` is always uppercase; `blank` records that the tile was a blank
/// played as `letter`, so it scores nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub letter: char,
    pub blank: bool,
}

impl Tile {
    pub fn new(letter: char) -> Self {
        Tile {
            letter: letter.to_ascii_uppercase(),
            blank: false,
        }
    }

    pub fn blank(letter: char) -> Self {
        Tile {
            letter: letter.to_ascii_uppercase(),
            blank: true,
        }
    }

    /// Points this tile contributes before premiums.
    pub fn value(self) -> u32 {
        if self.blank {
            0
        } else {
            value_of(self.letter).unwrap_or(0)
        }
    }

    /// The letter this tile consumes from a rack.
    pub fn rack_letter(self) -> char {
        if self.blank {
            BLANK
        } else {
            self.letter
        }
    }

    /// Compact notation: uppercase for a normal tile, lowercase for a blank.
    pub fn as_char(self) -> char {
        if self.blank {
            self.letter.to_ascii_lowercase()
        } else {
            self.letter
        }
    }

    /// Inverse of [`Tile::as_char`].
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Tile::new(c))
        } else if c.is_ascii_lowercase() {
            Some(Tile::blank(c))
        } else {
            None
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
