//! Opening rack exchange.
//!
//! Before the first move each peer fills its own rack and tells the other
//! which letters it drew. The peer that moves first sends first; the other
//! receives first. Each side performs exactly one send and one receive, so
//! neither can end up waiting on the other.
//!
//! ```text
//! first  : Idle -> AwaitingOwnDraw  -> AwaitingPeerDraw -> Ready
//! second : Idle -> AwaitingPeerDraw -> AwaitingOwnDraw  -> Ready
//! ```

use scrabble_core::{PlayerId, ReplayError};
use scrabble_protocol::wire_types::{WireTag, MAX_PAYLOAD_LEN};
use scrabble_protocol::{format_draw, parse_draw};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::channel::{ChannelReceiver, ChannelSender};
use crate::error::SessionError;
use crate::types::{lock_game, SharedGame};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HandshakeState {
    Idle,
    /// This peer must draw and announce its rack.
    AwaitingOwnDraw,
    /// This peer must wait for the other rack.
    AwaitingPeerDraw,
    Ready,
}

#[derive(Debug, Clone)]
pub struct Handshake {
    state: HandshakeState,
    moves_first: bool,
}

impl Handshake {
    pub fn new(moves_first: bool) -> Self {
        Handshake {
            state: HandshakeState::Idle,
            moves_first,
        }
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Move to the next state and return it. Stays in `Ready` once there.
    pub fn advance(&mut self) -> HandshakeState {
        use HandshakeState::*;

        self.state = match (self.state, self.moves_first) {
            (Idle, true) | (AwaitingPeerDraw, false) => AwaitingOwnDraw,
            (Idle, false) | (AwaitingOwnDraw, true) => AwaitingPeerDraw,
            (AwaitingOwnDraw, false) | (AwaitingPeerDraw, true) | (Ready, _) => Ready,
        };
        self.state
    }
}

/// Run the rack exchange to completion.
///
/// `local` is this peer's player, `peer` the other one. The peer's draw is
/// mirrored into the local game so both bags keep the same contents.
pub async fn exchange_racks<R, W>(
    game: &SharedGame,
    local: PlayerId,
    peer: PlayerId,
    moves_first: bool,
    sender: &ChannelSender<W>,
    receiver: &mut ChannelReceiver<R>,
) -> Result<(), SessionError>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut handshake = Handshake::new(moves_first);

    loop {
        match handshake.advance() {
            HandshakeState::AwaitingOwnDraw => {
                let letters = {
                    let mut game = lock_game(game);
                    game.draw_refill(local)
                        .map_err(|_| ReplayError::UnknownPlayer(local))?
                        .letters
                };
                sender.send(WireTag::Draw, &format_draw(&letters)).await?;
                debug!(player = %local, count = letters.len(), "announced opening rack");
            }
            HandshakeState::AwaitingPeerDraw => {
                let frame = receiver.receive(MAX_PAYLOAD_LEN).await?;
                if frame.tag != WireTag::Draw {
                    return Err(SessionError::ProtocolMismatch {
                        expected: "draw",
                        received: frame.tag.as_str().to_string(),
                    });
                }
                let letters = parse_draw(&frame.payload).map_err(|_| {
                    SessionError::ProtocolMismatch {
                        expected: "draw letters",
                        received: frame.payload.clone(),
                    }
                })?;
                lock_game(game).assign_draw(peer, &letters)?;
                debug!(player = %peer, count = letters.len(), "mirrored peer rack");
            }
            HandshakeState::Ready => {
                info!(local = %local, moves_first, "rack exchange complete");
                return Ok(());
            }
            // `advance` never returns to Idle.
            HandshakeState::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use HandshakeState::*;

    fn walk(moves_first: bool) -> Vec<HandshakeState> {
        let mut hs = Handshake::new(moves_first);
        let mut seen = vec![hs.state()];
        while hs.state() != Ready {
            seen.push(hs.advance());
        }
        seen
    }

    #[test]
    fn first_player_sends_before_receiving() {
        assert_eq!(walk(true), vec![Idle, AwaitingOwnDraw, AwaitingPeerDraw, Ready]);
    }

    #[test]
    fn second_player_receives_before_sending() {
        assert_eq!(walk(false), vec![Idle, AwaitingPeerDraw, AwaitingOwnDraw, Ready]);
    }

    #[test]
    fn ready_is_terminal() {
        let mut hs = Handshake::new(true);
        for _ in 0..3 {
            hs.advance();
        }
        assert_eq!(hs.advance(), Ready);
        assert_eq!(hs.advance(), Ready);
    }
}
