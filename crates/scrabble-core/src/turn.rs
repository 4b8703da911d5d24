//! Turn bookkeeping.

use crate::player::PlayerId;

/// Whose move it is, whether the game has ended, and the last result text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub current: PlayerId,
    pub game_over: bool,
    pub last_message: String,
}

impl TurnState {
    pub fn new(first: PlayerId) -> Self {
        TurnState {
            current: first,
            game_over: false,
            last_message: String::new(),
        }
    }

    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingMove(self.current)
        }
    }
}

/// Resting states of the turn machine.
///
/// Accepted and rejected proposals are transient: an accepted move goes
/// through refill and advance back to `AwaitingMove(next)` (or to
/// `GameOver`), a rejected one leaves `AwaitingMove(same)` untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingMove(PlayerId),
    GameOver,
}
