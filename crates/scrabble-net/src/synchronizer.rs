//! Keeps the local game and the peer's game in step.
//!
//! Outgoing: every accepted local move is announced as one batch
//!
//! ```text
//! notice (result text) -> commit (score;placements) -> draw (new letters) [-> end]
//! ```
//!
//! Incoming: a background listener reads the peer's batches and replays
//! them onto the local game without re-validating the move. It runs until
//! the stop signal fires, the peer sends `end` or the channel fails.
//!
//! Once the link has failed, from either direction, no further local move
//! is accepted, so the two games cannot drift apart.

use std::sync::Arc;

use scrabble_core::{AnnouncedMove, Move, PlayerId, TurnReport};
use scrabble_protocol::binary_codec::Frame;
use scrabble_protocol::wire_types::{WireTag, MAX_PAYLOAD_LEN};
use scrabble_protocol::{format_commit, format_draw, parse_commit, parse_draw};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::channel::{ChannelReceiver, ChannelSender};
use crate::error::{ChannelError, SessionError, SubmitError};
use crate::types::{lock_game, EventTx, SessionEvent, SharedGame};

// -----------------------------------------------------------------------------
// Stop signal
// -----------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LinkState {
    Open,
    Stopped,
    Failed,
}

/// Tells the listener to stop. Firing it also unblocks a listener that is
/// parked in `receive`.
///
/// Also records whether the connection failed; a failed link stays failed.
#[derive(Debug, Clone)]
pub struct StopSignal(Arc<watch::Sender<LinkState>>);

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LinkState::Open);
        StopSignal(Arc::new(tx))
    }

    pub fn stop(&self) {
        self.0.send_if_modified(|state| {
            if *state == LinkState::Open {
                *state = LinkState::Stopped;
                true
            } else {
                false
            }
        });
    }

    /// Stop and remember that the connection is unusable.
    pub fn fail(&self) {
        self.0.send_if_modified(|state| {
            if *state == LinkState::Failed {
                false
            } else {
                *state = LinkState::Failed;
                true
            }
        });
    }

    pub fn is_stopped(&self) -> bool {
        *self.0.borrow() != LinkState::Open
    }

    pub fn has_failed(&self) -> bool {
        *self.0.borrow() == LinkState::Failed
    }

    fn subscribe(&self) -> watch::Receiver<LinkState> {
        self.0.subscribe()
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Outgoing
// -----------------------------------------------------------------------------

/// Sends the local player's moves.
pub struct Synchronizer<W> {
    game: SharedGame,
    sender: ChannelSender<W>,
    local: PlayerId,
    stop: StopSignal,
}

impl<W> Synchronizer<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(game: SharedGame, sender: ChannelSender<W>, local: PlayerId, stop: StopSignal) -> Self {
        Synchronizer {
            game,
            sender,
            local,
            stop,
        }
    }

    pub fn local_player(&self) -> PlayerId {
        self.local
    }

    /// Play `mv` locally and announce it to the peer.
    ///
    /// A rejected move sends nothing. When the move ends the game the batch
    /// carries `end` and the local listener is stopped.
    ///
    /// Refused with `SubmitError::Session` once the link has failed. If the
    /// batch cannot be sent the local game is put back as it was.
    pub async fn submit_move(&self, mv: &Move) -> Result<TurnReport, SubmitError> {
        if self.stop.has_failed() {
            return Err(SessionError::ConnectionLost(ChannelError::Closed).into());
        }

        let (report, before) = {
            let mut game = lock_game(&self.game);
            let before = game.clone();
            let report = game.play(self.local, mv)?;
            (report, before)
        };

        let batch = outgoing_batch(&report);
        if let Err(e) = self.sender.send_batch(&batch).await {
            warn!("could not announce move, rolling back: {}", e);
            *lock_game(&self.game) = before;
            self.stop.fail();
            return Err(SessionError::from(e).into());
        }
        info!(
            player = %report.player,
            score = report.score_delta,
            drawn = report.drawn.len(),
            "move announced"
        );

        if report.game_over {
            info!("game over, sent end");
            self.stop.stop();
        }
        Ok(report)
    }

    pub async fn shutdown(&self) {
        if let Err(e) = self.sender.shutdown().await {
            debug!("shutdown after close: {}", e);
        }
    }
}

/// Frames announcing one accepted move.
pub fn outgoing_batch(report: &TurnReport) -> Vec<Frame> {
    let mut batch = vec![
        Frame::notice(clamp_payload(&report.message)),
        Frame::commit(format_commit(&AnnouncedMove::from(report))),
        Frame::draw(format_draw(&report.drawn)),
    ];
    if report.game_over {
        batch.push(Frame::end());
    }
    batch
}

/// Cut free text to the payload limit on a char boundary.
fn clamp_payload(text: &str) -> &str {
    if text.len() <= MAX_PAYLOAD_LEN {
        return text;
    }
    let mut end = MAX_PAYLOAD_LEN;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// -----------------------------------------------------------------------------
// Incoming
// -----------------------------------------------------------------------------

enum ReplayState {
    Idle,
    Noticed {
        message: String,
    },
    Committed {
        message: String,
        announced: AnnouncedMove,
    },
}

impl ReplayState {
    fn expected(&self) -> &'static str {
        match self {
            ReplayState::Idle => "notice or end",
            ReplayState::Noticed { .. } => "commit",
            ReplayState::Committed { .. } => "draw",
        }
    }
}

#[derive(Debug)]
enum ReplayStep {
    Pending,
    Applied(SessionEvent),
    Ended(SessionEvent),
}

/// Reassembles the peer's batches and applies each one as a single
/// transition once its `draw` arrives.
struct Replay {
    peer: PlayerId,
    state: ReplayState,
}

impl Replay {
    fn new(peer: PlayerId) -> Self {
        Replay {
            peer,
            state: ReplayState::Idle,
        }
    }

    fn accept(&mut self, game: &SharedGame, frame: Frame) -> Result<ReplayStep, SessionError> {
        let state = std::mem::replace(&mut self.state, ReplayState::Idle);

        match (state, frame.tag) {
            (ReplayState::Idle, WireTag::Notice) => {
                self.state = ReplayState::Noticed {
                    message: frame.payload,
                };
                Ok(ReplayStep::Pending)
            }
            (ReplayState::Noticed { message }, WireTag::Commit) => {
                let announced = parse_commit(&frame.payload).map_err(|_| {
                    SessionError::ProtocolMismatch {
                        expected: "commit payload",
                        received: frame.payload.clone(),
                    }
                })?;
                self.state = ReplayState::Committed { message, announced };
                Ok(ReplayStep::Pending)
            }
            (ReplayState::Committed { message, announced }, WireTag::Draw) => {
                let drawn = parse_draw(&frame.payload).map_err(|_| {
                    SessionError::ProtocolMismatch {
                        expected: "draw letters",
                        received: frame.payload.clone(),
                    }
                })?;

                let mut game = lock_game(game);
                game.replay_turn(self.peer, &announced, &message, &drawn)?;

                Ok(ReplayStep::Applied(SessionEvent::RemoteMove {
                    player: self.peer,
                    message,
                    score_delta: announced.score_delta,
                    drawn,
                    next_player: game.current_player(),
                    game_over: game.is_game_over(),
                }))
            }
            (ReplayState::Idle, WireTag::End) => {
                let mut game = lock_game(game);
                game.mark_game_over();
                Ok(ReplayStep::Ended(SessionEvent::GameOver {
                    final_scores: game.final_scores(),
                }))
            }
            (state, tag) => Err(SessionError::ProtocolMismatch {
                expected: state.expected(),
                received: tag.as_str().to_string(),
            }),
        }
    }
}

/// Why a listener finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListenerExit {
    /// The stop signal fired.
    Stopped,
    /// The peer sent `end`.
    Ended,
    /// The session failed; the error went out as `SessionEvent::Failed`.
    Failed,
}

pub struct ListenerHandle {
    task: JoinHandle<ListenerExit>,
    stop: StopSignal,
}

impl ListenerHandle {
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the listener task to return.
    pub async fn join(self) -> ListenerExit {
        match self.task.await {
            Ok(exit) => exit,
            Err(e) => {
                error!("listener task aborted: {}", e);
                ListenerExit::Failed
            }
        }
    }
}

/// Start the background listener for the peer's moves.
///
/// `closer` is used to close the connection if the peer breaks protocol.
pub fn spawn_listener<R, W>(
    receiver: ChannelReceiver<R>,
    closer: ChannelSender<W>,
    game: SharedGame,
    peer: PlayerId,
    events: EventTx,
    stop: StopSignal,
) -> ListenerHandle
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let task = tokio::spawn(run_listener(
        receiver,
        closer,
        game,
        peer,
        events,
        stop.clone(),
    ));
    ListenerHandle { task, stop }
}

async fn run_listener<R, W>(
    mut receiver: ChannelReceiver<R>,
    closer: ChannelSender<W>,
    game: SharedGame,
    peer: PlayerId,
    events: EventTx,
    stop: StopSignal,
) -> ListenerExit
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    let mut stop_rx = stop.subscribe();
    let mut replay = Replay::new(peer);

    loop {
        if stop.is_stopped() {
            debug!("listener stopped");
            return ListenerExit::Stopped;
        }

        let received = tokio::select! {
            biased;
            _ = stop_rx.changed() => continue,
            received = receiver.receive(MAX_PAYLOAD_LEN) => received,
        };

        let step = received
            .map_err(SessionError::from)
            .and_then(|frame| replay.accept(&game, frame));

        match step {
            Ok(ReplayStep::Pending) => {}
            Ok(ReplayStep::Applied(event)) => {
                debug!(?event, "replayed peer move");
                let _ = events.send(event);
            }
            Ok(ReplayStep::Ended(event)) => {
                info!("peer ended the game");
                let _ = events.send(event);
                stop.stop();
                return ListenerExit::Ended;
            }
            Err(e) => {
                warn!("session failed: {}", e);
                stop.fail();
                if let Err(close_err) = closer.shutdown().await {
                    debug!("close after failure: {}", close_err);
                }
                let _ = events.send(SessionEvent::Failed(e));
                return ListenerExit::Failed;
            }
        }
    }
}
