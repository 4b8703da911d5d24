//! Session bootstrap.
//!
//! The host binds, accepts exactly one peer, decides who moves first and
//! sends that decision as a `start` frame. The joiner connects and waits
//! for `start`. From there both sides run the same steps:
//!
//! 1. rack exchange (see [`crate::handshake`]),
//! 2. spawn the background listener,
//! 3. hand a [`Session`] plus its event receiver to the front-end.
//!
//! Player 1 is always whoever moves first.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use scrabble_core::{Game, Move, PlayerId, TurnReport};
use scrabble_protocol::wire_types::{WireTag, MAX_PAYLOAD_LEN};
use scrabble_protocol::{parse_start, FirstMover};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::channel::{self, ChannelReceiver, ChannelSender};
use crate::config::Config;
use crate::error::{ChannelError, SessionError, SubmitError};
use crate::handshake::exchange_racks;
use crate::synchronizer::{spawn_listener, ListenerExit, ListenerHandle, StopSignal, Synchronizer};
use crate::types::{lock_game, EventRx, Role, SharedGame};

/// Who is who on this connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSession {
    pub role: Role,
    pub first_player: FirstMover,
    pub local_player: PlayerId,
    pub peer_player: PlayerId,
    pub peer_addr: Option<SocketAddr>,
}

impl NetworkSession {
    pub fn new(role: Role, first_player: FirstMover, peer_addr: Option<SocketAddr>) -> Self {
        let moves_first = matches!(
            (role, first_player),
            (Role::Server, FirstMover::Server) | (Role::Client, FirstMover::Client)
        );
        let (local_player, peer_player) = if moves_first {
            (PlayerId(1), PlayerId(2))
        } else {
            (PlayerId(2), PlayerId(1))
        };

        NetworkSession {
            role,
            first_player,
            local_player,
            peer_player,
            peer_addr,
        }
    }

    pub fn moves_first(&self) -> bool {
        self.local_player == PlayerId::FIRST
    }
}

/// A running two-peer game.
pub struct Session<W = OwnedWriteHalf> {
    info: NetworkSession,
    game: SharedGame,
    synchronizer: Synchronizer<W>,
    listener: ListenerHandle,
}

impl<W> Session<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn info(&self) -> &NetworkSession {
        &self.info
    }

    pub fn game(&self) -> &SharedGame {
        &self.game
    }

    pub fn is_my_turn(&self) -> bool {
        let game = lock_game(&self.game);
        !game.is_game_over() && game.current_player() == self.info.local_player
    }

    pub async fn submit_move(&self, mv: &Move) -> Result<TurnReport, SubmitError> {
        self.synchronizer.submit_move(mv).await
    }

    pub fn listener_finished(&self) -> bool {
        self.listener.is_finished()
    }

    /// Stop the listener, close the connection and wait for the listener
    /// to return.
    pub async fn close(self) -> ListenerExit {
        self.listener.stop();
        self.synchronizer.shutdown().await;
        self.listener.join().await
    }
}

/// Build a session over an already connected channel.
///
/// Creates the two-player game, runs the rack exchange and starts the
/// listener. `game` overrides the fresh game, e.g. one loaded from a
/// snapshot.
pub async fn establish<R, W>(
    info: NetworkSession,
    game: Game,
    mut receiver: ChannelReceiver<R>,
    sender: ChannelSender<W>,
) -> Result<(Session<W>, EventRx), SessionError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let game: SharedGame = Arc::new(Mutex::new(game));

    if let Err(e) = exchange_racks(
        &game,
        info.local_player,
        info.peer_player,
        info.moves_first(),
        &sender,
        &mut receiver,
    )
    .await
    {
        warn!("rack exchange failed: {}", e);
        if let Err(close_err) = sender.shutdown().await {
            debug!("close after failed exchange: {}", close_err);
        }
        return Err(e);
    }

    let stop = StopSignal::new();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let listener = spawn_listener(
        receiver,
        sender.clone(),
        Arc::clone(&game),
        info.peer_player,
        event_tx,
        stop.clone(),
    );
    let synchronizer = Synchronizer::new(Arc::clone(&game), sender, info.local_player, stop);

    info!(
        role = ?info.role,
        local = %info.local_player,
        first = %info.first_player,
        "session ready"
    );

    Ok((
        Session {
            info,
            game,
            synchronizer,
            listener,
        },
        event_rx,
    ))
}

fn new_game(config: &Config) -> Game {
    match config.seed {
        Some(seed) => Game::with_seed(2, seed),
        None => Game::new(2),
    }
}

/// Listening side, before a peer has connected.
pub struct HostListener {
    listener: TcpListener,
    config: Config,
}

impl HostListener {
    pub async fn bind(config: Config) -> std::io::Result<Self> {
        let addr = config.socket_addr_string();
        let listener = TcpListener::bind(&addr).await?;
        info!("Listening on {}", listener.local_addr()?);
        Ok(HostListener { listener, config })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Wait for one peer, announce who moves first and set up the game.
    pub async fn accept(self) -> Result<(Session, EventRx), SessionError> {
        let (stream, peer_addr) = self.listener.accept().await.map_err(ChannelError::from)?;
        info!("Accepted connection from {}", peer_addr);

        let (receiver, sender) = channel::from_tcp(stream)?;
        let first = self.config.first_player.decide(&mut rand::thread_rng());
        sender.send(WireTag::Start, first.as_str()).await?;

        let info = NetworkSession::new(Role::Server, first, Some(peer_addr));
        establish(info, new_game(&self.config), receiver, sender).await
    }
}

/// Connect to a host and set up the game.
pub async fn join(addr: &str, config: &Config) -> Result<(Session, EventRx), SessionError> {
    info!("Connecting to {}...", addr);
    let stream = TcpStream::connect(addr).await.map_err(ChannelError::from)?;
    let peer_addr = stream.peer_addr().ok();
    let (mut receiver, sender) = channel::from_tcp(stream)?;

    let frame = receiver.receive(MAX_PAYLOAD_LEN).await?;
    if frame.tag != WireTag::Start {
        return Err(SessionError::ProtocolMismatch {
            expected: "start",
            received: frame.tag.as_str().to_string(),
        });
    }
    let first = parse_start(&frame.payload).map_err(|_| SessionError::ProtocolMismatch {
        expected: "start payload",
        received: frame.payload.clone(),
    })?;
    info!("Connected, {} moves first", first);

    let info = NetworkSession::new(Role::Client, first, peer_addr);
    establish(info, new_game(config), receiver, sender).await
}
