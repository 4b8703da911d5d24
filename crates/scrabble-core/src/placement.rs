//! Proposed tile placements.
//!
//! Text form of one placement is `<position><tile>`: `H8A` lays an A on the
//! centre square, `H9e` lays a blank played as E.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::letter::Tile;
use crate::position::Position;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Placement {
    pub pos: Position,
    pub tile: Tile,
}

impl Placement {
    pub fn new(pos: Position, tile: Tile) -> Self {
        Placement { pos, tile }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pos, self.tile)
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let last = s
            .chars()
            .last()
            .ok_or_else(|| ParseError::Placement(s.to_string()))?;
        let tile = Tile::from_char(last).ok_or_else(|| ParseError::Placement(s.to_string()))?;
        let pos_part = &s[..s.len() - last.len_utf8()];
        let pos = pos_part
            .parse()
            .map_err(|_| ParseError::Placement(s.to_string()))?;
        Ok(Placement { pos, tile })
    }
}

/// A candidate set of placements for one turn.
///
/// Lives only until validation: either committed to the board or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Move {
    pub placements: Vec<Placement>,
}

impl Move {
    pub fn new(placements: Vec<Placement>) -> Self {
        Move { placements }
    }

    /// Parse whitespace- or comma-separated placements, e.g. `"H8C H9A H10T"`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let placements = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Move { placements })
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.placements.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_digit_columns_and_blanks() {
        let p: Placement = "O15z".parse().unwrap();
        assert_eq!(p.pos.to_string(), "O15");
        assert_eq!(p.tile, Tile::blank('Z'));
        assert_eq!(p.to_string(), "O15z");
    }

    #[test]
    fn move_parses_mixed_separators() {
        let mv = Move::parse("H8C, H9A H10T").unwrap();
        assert_eq!(mv.placements.len(), 3);
        assert_eq!(mv.to_string(), "H8C,H9A,H10T");
    }

    #[test]
    fn bad_tokens_are_reported() {
        assert_eq!(
            Move::parse("H8C Q9A").unwrap_err(),
            ParseError::Placement("Q9A".to_string())
        );
        assert!("H8".parse::<Placement>().is_err());
        assert!("".parse::<Placement>().is_err());
    }
}
