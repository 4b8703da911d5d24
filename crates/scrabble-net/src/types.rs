//! Shared types for a networked session.
//!
//! This module defines:
//! - `Role`: which side of the connection this peer is
//! - `SharedGame`: the game both control threads mutate
//! - `SessionEvent` and its channel aliases, flowing from the listener to
//!   the front-end

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scrabble_core::{Game, PlayerId};
use tokio::sync::mpsc;

use crate::error::SessionError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
}

/// The local game, shared by the front-end and the listener task.
///
/// Held for one transition at a time and never across an `.await`.
pub type SharedGame = Arc<Mutex<Game>>;

/// Lock the shared game. A panic elsewhere while holding the lock does not
/// make the game unusable: every transition leaves it consistent on return.
pub fn lock_game(game: &SharedGame) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What the listener reports to the front-end.
#[derive(Debug)]
pub enum SessionEvent {
    /// A peer move has been replayed onto the local game.
    RemoteMove {
        player: PlayerId,
        message: String,
        score_delta: u32,
        drawn: Vec<char>,
        next_player: PlayerId,
        game_over: bool,
    },

    /// The peer announced the end of the game.
    GameOver { final_scores: Vec<(PlayerId, i32)> },

    /// The session is over; reported once.
    Failed(SessionError),
}

/// Channel from the listener task → front-end.
pub type EventTx = mpsc::UnboundedSender<SessionEvent>;
pub type EventRx = mpsc::UnboundedReceiver<SessionEvent>;
