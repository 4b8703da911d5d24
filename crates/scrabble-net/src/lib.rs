//! scrabble-net
//!
//! Keeps two game instances in lock-step over one TCP connection.
//!
//! - [`channel`]      : length-prefixed frame transport
//! - [`handshake`]    : opening rack exchange
//! - [`synchronizer`] : outgoing move batches and the background listener
//! - [`session`]      : host/join bootstrap tying it all together

pub mod config;
pub mod types;
pub mod error;
pub mod channel;
pub mod handshake;
pub mod synchronizer;
pub mod session;

pub use channel::{ChannelReceiver, ChannelSender};
pub use config::{Config, FirstPlayerPolicy};
pub use error::{ChannelError, SessionError, SubmitError};
pub use session::{establish, join, HostListener, NetworkSession, Session};
pub use synchronizer::{ListenerExit, ListenerHandle, StopSignal, Synchronizer};
pub use types::{lock_game, EventRx, EventTx, Role, SessionEvent, SharedGame};
