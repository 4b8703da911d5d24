//! Payload text for each tag.
//!
//! Formats:
//!
//! - `start`:  `server` or `client`, naming who makes the first move.
//! - `draw`:   the drawn letters concatenated, e.g. `AEIRST?` (may be empty).
//! - `notice`: free text, used as-is.
//! - `commit`: `<score>;<placement>,<placement>...`, e.g. `24;H8C,H9A,H10T`.
//!             An empty payload means no tiles and no score.
//! - `end`:    empty.

use std::fmt;

use scrabble_core::letter::is_rack_letter;
use scrabble_core::{AnnouncedMove, Move};

use crate::binary_codec::ProtocolError;

/// The server's decision about who moves first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FirstMover {
    Server,
    Client,
}

impl FirstMover {
    pub fn as_str(self) -> &'static str {
        match self {
            FirstMover::Server => "server",
            FirstMover::Client => "client",
        }
    }
}

impl fmt::Display for FirstMover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_start(payload: &str) -> Result<FirstMover, ProtocolError> {
    match payload.trim() {
        "server" => Ok(FirstMover::Server),
        "client" => Ok(FirstMover::Client),
        other => Err(ProtocolError::InvalidPayload {
            field: "start",
            value: other.to_string(),
        }),
    }
}

pub fn format_draw(letters: &[char]) -> String {
    letters.iter().collect()
}

pub fn parse_draw(payload: &str) -> Result<Vec<char>, ProtocolError> {
    let letters: Vec<char> = payload.chars().collect();
    if letters.iter().any(|&c| !is_rack_letter(c)) {
        return Err(ProtocolError::InvalidPayload {
            field: "draw",
            value: payload.to_string(),
        });
    }
    Ok(letters)
}

pub fn format_commit(announced: &AnnouncedMove) -> String {
    let placements = Move::new(announced.placements.clone());
    format!("{};{}", announced.score_delta, placements)
}

pub fn parse_commit(payload: &str) -> Result<AnnouncedMove, ProtocolError> {
    let invalid = || ProtocolError::InvalidPayload {
        field: "commit",
        value: payload.to_string(),
    };

    if payload.is_empty() {
        return Ok(AnnouncedMove::default());
    }

    let (score, placements) = payload.split_once(';').ok_or_else(invalid)?;
    let score_delta = score.trim().parse::<u32>().map_err(|_| invalid())?;
    let placements = Move::parse(placements).map_err(|_| invalid())?.placements;

    Ok(AnnouncedMove {
        score_delta,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrabble_core::Tile;

    #[test]
    fn commit_carries_score_and_tiles() {
        let announced = parse_commit("24;H8C,H9a,H10T").unwrap();
        assert_eq!(announced.score_delta, 24);
        assert_eq!(announced.placements.len(), 3);
        assert_eq!(announced.placements[1].tile, Tile::blank('A'));
        assert_eq!(format_commit(&announced), "24;H8C,H9a,H10T");
    }

    #[test]
    fn empty_commit_is_an_empty_move() {
        assert_eq!(parse_commit("").unwrap(), AnnouncedMove::default());
        assert_eq!(parse_commit("0;").unwrap(), AnnouncedMove::default());
    }

    #[test]
    fn malformed_commit_is_reported() {
        assert!(parse_commit("H8C").is_err());
        assert!(parse_commit("-3;H8C").is_err());
        assert!(parse_commit("3;Z99C").is_err());
    }

    #[test]
    fn draw_accepts_rack_letters_only() {
        assert_eq!(parse_draw("AB?").unwrap(), vec!['A', 'B', '?']);
        assert_eq!(parse_draw("").unwrap(), Vec::<char>::new());
        assert!(parse_draw("ab").is_err());
        assert_eq!(format_draw(&['Q', '?']), "Q?");
    }

    #[test]
    fn start_names_the_first_mover() {
        assert_eq!(parse_start("client").unwrap(), FirstMover::Client);
        assert_eq!(parse_start(FirstMover::Server.as_str()).unwrap(), FirstMover::Server);
        assert!(parse_start("me").is_err());
    }
}
