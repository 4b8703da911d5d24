//! scrabble-protocol
//!
//! Wire-level encoding/decoding for the game synchronizer.
//!
//! - [`wire_types`]   : tags, version, size limits
//! - [`binary_codec`] : one `(tag, payload)` frame <-> bytes
//! - [`text_codec`]   : payload text for draws, commits and the opening decision

pub mod wire_types;
pub mod binary_codec;
pub mod text_codec;

pub use wire_types::{WireTag, MAX_PAYLOAD_LEN, PROTOCOL_VERSION};
pub use binary_codec::{decode_frame, encode_frame, Frame, ProtocolError};
pub use text_codec::{
    format_commit, format_draw, parse_commit, parse_draw, parse_start, FirstMover,
};
