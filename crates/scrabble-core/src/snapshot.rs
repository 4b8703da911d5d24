//! Serializable game state for the persistence boundary.
//!
//! Saving and loading files is the caller's business; the engine only
//! produces a [`GameSnapshot`] and accepts one as its starting state.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::SnapshotError;
use crate::letter::Tile;
use crate::position::{Position, BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// One string per row, `.` for an empty square, lowercase for blanks.
    pub board: Vec<String>,
    pub players: Vec<PlayerSnapshot>,
    pub current_player: u8,
    /// Letters left in the bag, in supply order.
    pub bag: String,
    pub bag_remaining: usize,
    #[serde(default)]
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: u8,
    pub score: i32,
    pub rack: String,
}

pub(crate) fn parse_board(rows: &[String]) -> Result<Board, SnapshotError> {
    let mut board = Board::new();
    if rows.len() != BOARD_SIZE {
        return Err(SnapshotError::BoardRow { row: rows.len() });
    }
    for (r, row) in rows.iter().enumerate() {
        if row.chars().count() != BOARD_SIZE {
            return Err(SnapshotError::BoardRow { row: r });
        }
        for (c, ch) in row.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let tile = Tile::from_char(ch).ok_or(SnapshotError::BoardRow { row: r })?;
            let pos = Position::new(r, c).ok_or(SnapshotError::BoardRow { row: r })?;
            board.place(pos, tile);
        }
    }
    Ok(board)
}
