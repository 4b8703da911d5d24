//! The 15x15 board with its premium squares.

use std::fmt;

use crate::letter::Tile;
use crate::position::{Position, BOARD_SIZE};

/// Score multiplier printed on a square.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Premium {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    pub fn letter_multiplier(self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    fn from_layout(c: u8) -> Self {
        match c {
            b'T' => Premium::TripleWord,
            b'D' => Premium::DoubleWord,
            b't' => Premium::TripleLetter,
            b'd' => Premium::DoubleLetter,
            _ => Premium::None,
        }
    }
}

// T = triple word, D = double word, t = triple letter, d = double letter.
const LAYOUT: [&[u8; BOARD_SIZE]; BOARD_SIZE] = [
    b"T..d...T...d..T",
    b".D...t...t...D.",
    b"..D...d.d...D..",
    b"d..D...d...D..d",
    b"....D.....D....",
    b".t...t...t...t.",
    b"..d...d.d...d..",
    b"T..d...D...d..T",
    b"..d...d.d...d..",
    b".t...t...t...t.",
    b"....D.....D....",
    b"d..D...d...D..d",
    b"..D...d.d...D..",
    b".D...t...t...D.",
    b"T..d...T...d..T",
];

/// Placed tiles. Premiums are fixed by [`Board::premium`]; they only count
/// for tiles laid in the move that covers them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn premium(&self, pos: Position) -> Premium {
        Premium::from_layout(LAYOUT[pos.row()][pos.col()])
    }

    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.cells[pos.row()][pos.col()]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Writes a tile. Only the turn engine calls this, after validation or
    /// when replaying a peer's announced move.
    pub(crate) fn place(&mut self, pos: Position, tile: Tile) {
        self.cells[pos.row()][pos.col()] = Some(tile);
    }

    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    pub fn tile_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|c| c.is_some())
            .count()
    }

    /// All placed tiles with their position, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.and_then(|tile| Position::new(r, c).map(|pos| (pos, tile)))
            })
        })
    }

    /// One text row per board row: `.` for empty, the tile's compact char
    /// otherwise.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(Tile::as_char).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 1..=BOARD_SIZE {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{:>3}", (b'A' + r as u8) as char)?;
            for (c, cell) in row.iter().enumerate() {
                let glyph = match cell {
                    Some(tile) => tile.as_char(),
                    None => match Premium::from_layout(LAYOUT[r][c]) {
                        Premium::TripleWord => '=',
                        Premium::DoubleWord => '-',
                        Premium::TripleLetter => '"',
                        Premium::DoubleLetter => '\'',
                        Premium::None => '.',
                    },
                };
                write!(f, "{:>3}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_symmetric() {
        let board = Board::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let p = Position::new(r, c).unwrap();
                let mirrored = Position::new(c, r).unwrap();
                let flipped = Position::new(BOARD_SIZE - 1 - r, c).unwrap();
                assert_eq!(board.premium(p), board.premium(mirrored));
                assert_eq!(board.premium(p), board.premium(flipped));
            }
        }
    }

    #[test]
    fn centre_is_double_word() {
        let board = Board::new();
        assert_eq!(board.premium(Position::centre()), Premium::DoubleWord);
        assert_eq!(board.premium("A1".parse().unwrap()), Premium::TripleWord);
        assert_eq!(board.premium("B6".parse().unwrap()), Premium::TripleLetter);
        assert_eq!(board.premium("A4".parse().unwrap()), Premium::DoubleLetter);
    }

    #[test]
    fn rows_render_blanks_lowercase() {
        let mut board = Board::new();
        board.place(Position::centre(), Tile::blank('E'));
        board.place("H9".parse().unwrap(), Tile::new('T'));
        assert_eq!(board.to_rows()[7], ".......eT......");
        assert_eq!(board.tile_count(), 2);
    }
}
