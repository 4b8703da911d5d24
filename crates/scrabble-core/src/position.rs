//! Board coordinates.
//!
//! Rows are lettered `A`..`O` from the top and columns numbered `1`..`15`
//! from the left, so the centre square is `H8`.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// A cell coordinate, zero-based internally.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

/// Direction a word runs in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl Position {
    /// Zero-based constructor; `None` when off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The centre square, `H8`.
    pub fn centre() -> Self {
        Position { row: 7, col: 7 }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// One step along `dir`; `delta` is -1 or +1.
    pub fn step(self, dir: Direction, delta: isize) -> Option<Self> {
        let (r, c) = match dir {
            Direction::Across => (self.row() as isize, self.col() as isize + delta),
            Direction::Down => (self.row() as isize + delta, self.col() as isize),
        };
        if r < 0 || c < 0 {
            return None;
        }
        Position::new(r as usize, c as usize)
    }

    /// The four orthogonal neighbours that are on the board.
    pub fn neighbours(self) -> impl Iterator<Item = Position> {
        [
            self.step(Direction::Down, -1),
            self.step(Direction::Down, 1),
            self.step(Direction::Across, -1),
            self.step(Direction::Across, 1),
        ]
        .into_iter()
        .flatten()
    }

    /// Coordinate along `dir` (column for across, row for down).
    pub fn along(self, dir: Direction) -> usize {
        match dir {
            Direction::Across => self.col(),
            Direction::Down => self.row(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.row) as char, self.col + 1)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let row_char = chars
            .next()
            .ok_or_else(|| ParseError::Position(s.to_string()))?
            .to_ascii_uppercase();
        if !row_char.is_ascii_uppercase() {
            return Err(ParseError::Position(s.to_string()));
        }
        let col: usize = chars
            .as_str()
            .parse()
            .map_err(|_| ParseError::Position(s.to_string()))?;
        let row = (row_char as u8 - b'A') as usize;
        if col == 0 {
            return Err(ParseError::Position(s.to_string()));
        }
        Position::new(row, col - 1).ok_or_else(|| ParseError::Position(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_h8() {
        assert_eq!(Position::centre().to_string(), "H8");
        assert_eq!("h8".parse::<Position>().unwrap(), Position::centre());
    }

    #[test]
    fn parse_rejects_off_board() {
        assert!("P1".parse::<Position>().is_err());
        assert!("A0".parse::<Position>().is_err());
        assert!("A16".parse::<Position>().is_err());
        assert!("8H".parse::<Position>().is_err());
        assert_eq!("O15".parse::<Position>().unwrap(), Position { row: 14, col: 14 });
    }

    #[test]
    fn only_on_board_cells_can_be_built() {
        assert!(Position::new(BOARD_SIZE, 0).is_none());
        assert!(Position::new(0, BOARD_SIZE).is_none());
        let corner = Position::new(14, 14).unwrap();
        assert_eq!((corner.row(), corner.col()), (14, 14));
        assert_eq!(corner.step(Direction::Across, 1), None);
        assert_eq!(corner.step(Direction::Down, 1), None);
    }

    #[test]
    fn corner_has_two_neighbours() {
        let corner = Position::new(0, 0).unwrap();
        assert_eq!(corner.neighbours().count(), 2);
        assert_eq!(Position::centre().neighbours().count(), 4);
    }
}
