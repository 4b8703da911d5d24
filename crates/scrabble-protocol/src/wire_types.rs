//! Low-level wire types and constants.
//!
//! This module defines:
//! - Message tags.
//! - Protocol versioning.
//! - The payload size limit every frame obeys.
//!
//! The actual encode/decode logic lives in `binary_codec`.

use std::fmt;

/// Current protocol version.
///
/// Carried in every frame header; bumped on incompatible changes.
pub const PROTOCOL_VERSION: u8 = 1;

/// Largest payload, in bytes of UTF-8, a single frame may carry.
pub const MAX_PAYLOAD_LEN: usize = 128;

/// Frame header: tag, version, two reserved bytes.
pub const HEADER_LEN: usize = 4;

/// Message tags.
///
/// These IDs are used in the first byte of each binary frame.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WireTag {
    /// Server's opening decision (`server` / `client` moves first).
    Start = 0,

    /// Concatenated drawn letters.
    Draw = 1,

    /// Human-readable move result.
    Notice = 2,

    /// The move itself: `<score>;<placements>`, may be empty.
    Commit = 3,

    /// Game over. Empty payload.
    End = 4,
}

impl WireTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(WireTag::Start),
            1 => Some(WireTag::Draw),
            2 => Some(WireTag::Notice),
            3 => Some(WireTag::Commit),
            4 => Some(WireTag::End),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WireTag::Start => "start",
            WireTag::Draw => "draw",
            WireTag::Notice => "notice",
            WireTag::Commit => "commit",
            WireTag::End => "end",
        }
    }
}

impl fmt::Display for WireTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tiny helper for validating payload lengths.
pub fn validate_payload_len(len: usize) -> bool {
    len <= MAX_PAYLOAD_LEN
}
