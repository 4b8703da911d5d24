//! Error types for the networking layer.

use std::io;

use scrabble_core::{InvalidMove, ReplayError};
use scrabble_protocol::ProtocolError;
use thiserror::Error;

/// Failures of the frame transport.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("connection closed by peer")]
    Closed,

    /// The frame was drained from the stream; the next `receive` starts at
    /// the following frame.
    #[error("payload of {len} bytes exceeds receive limit of {max}")]
    Truncated { len: usize, max: usize },

    #[error("malformed frame: {0}")]
    Malformed(#[from] ProtocolError),

    #[error("i/o error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for ChannelError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted => ChannelError::Closed,
            _ => ChannelError::Io(e),
        }
    }
}

/// Failures that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The peer sent something other than what the conversation allows next.
    #[error("protocol mismatch: expected {expected}, received {received:?}")]
    ProtocolMismatch {
        expected: &'static str,
        received: String,
    },

    #[error("connection lost: {0}")]
    ConnectionLost(#[from] ChannelError),

    /// A replayed peer move could not be applied to the local game.
    #[error("game state diverged from peer: {0}")]
    Diverged(#[from] ReplayError),
}

/// Outcome of a failed local move submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Refused by the local game; nothing was sent.
    #[error("{0}")]
    Rejected(#[from] InvalidMove),

    #[error(transparent)]
    Session(#[from] SessionError),
}
