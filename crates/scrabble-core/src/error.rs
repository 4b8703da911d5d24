//! Error types for the turn engine.
//!
//! `InvalidMove` is the everyday one: a rejected proposal that leaves the
//! game untouched and is shown to the local player. It never crosses the
//! network. The remaining types cover malformed input and peer replays that
//! cannot be reconciled with local state.

use thiserror::Error;

use crate::player::PlayerId;
use crate::position::Position;

/// Why a proposed move was rejected. Display text is the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("not your turn: it is player {current}'s move")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("the game is over")]
    GameOver,

    #[error("no such player {0}")]
    UnknownPlayer(PlayerId),

    #[error("no tile placed")]
    EmptyMove,

    #[error("two tiles placed on {0}")]
    DuplicatePosition(Position),

    #[error("{pos} already holds {existing}, cannot place {proposed}")]
    Occupied {
        pos: Position,
        existing: char,
        proposed: char,
    },

    #[error("letter {0} is not in your rack")]
    LetterNotInRack(char),

    #[error("tiles must be placed in a single row or column")]
    NotInLine,

    #[error("placement is not contiguous: {0} is empty")]
    Gap(Position),

    #[error("the first word must cover the centre square H8")]
    MissesCentre,

    #[error("placement is not connected to the tiles on the board")]
    Disconnected,

    #[error("a word needs at least two letters")]
    TooShort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BagError {
    #[error("'{0}' is not a tile letter")]
    UnknownLetter(char),

    #[error("no '{0}' left in the bag")]
    NotInBag(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RackError {
    #[error("rack holds {held} tiles, cannot add {incoming} more")]
    Overflow { held: usize, incoming: usize },

    #[error("'{0}' is not a rack letter")]
    InvalidLetter(char),

    #[error("'{0}' is not in the rack")]
    Missing(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid position '{0}'")]
    Position(String),

    #[error("invalid placement '{0}'")]
    Placement(String),
}

/// A peer-announced draw or move that does not fit the local state.
///
/// Seeing one means the two sides have diverged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("peer player {player} acted while player {current} is up")]
    OutOfTurn { player: PlayerId, current: PlayerId },

    #[error("no such player {0}")]
    UnknownPlayer(PlayerId),

    #[error("peer placed a tile on occupied square {0}")]
    Occupied(Position),

    #[error("peer draw does not match the local bag: {0}")]
    Bag(#[from] BagError),

    #[error("peer rack does not match: {0}")]
    Rack(#[from] RackError),

    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot has no players")]
    NoPlayers,

    #[error("snapshot has {0} players, at most 4 are supported")]
    TooManyPlayers(usize),

    #[error("board row {row} is malformed")]
    BoardRow { row: usize },

    #[error("current player {0} is not in the snapshot")]
    UnknownCurrent(u8),

    #[error("bag holds {actual} tiles but snapshot declares {declared}")]
    RemainingMismatch { declared: usize, actual: usize },

    #[error(transparent)]
    Rack(#[from] RackError),

    #[error(transparent)]
    Bag(#[from] BagError),
}
