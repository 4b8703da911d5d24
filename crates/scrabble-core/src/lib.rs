//! scrabble-core
//!
//! Pure turn engine logic:
//! - letters, tile supply and the bag
//! - racks, board and premium squares
//! - move validation and scoring
//! - the turn engine with peer replay and snapshots
//!
//! No networking and no protocol knowledge; the wire format lives in
//! `scrabble-protocol`.

pub mod letter;
pub mod bag;
pub mod rack;
pub mod position;
pub mod board;
pub mod placement;
pub mod rules;
pub mod player;
pub mod turn;
pub mod game;
pub mod snapshot;
pub mod error;

pub use letter::{Tile, BLANK};
pub use bag::{Draw, TileBag};
pub use rack::{Rack, RACK_CAPACITY};
pub use position::{Direction, Position, BOARD_SIZE};
pub use board::{Board, Premium};
pub use placement::{Move, Placement};
pub use player::{Player, PlayerId};
pub use turn::{TurnPhase, TurnState};
pub use game::{AnnouncedMove, Game, MoveReport, Refill, TurnReport, MAX_PLAYERS};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use error::{BagError, InvalidMove, ParseError, RackError, ReplayError, SnapshotError};
