//! Binary encoding/decoding of a single frame.
//!
//! This module converts between:
//! - raw binary frames (`&[u8]`)
//! - a typed [`Frame`] (`tag` + UTF-8 `payload`)
//!
//! Framing model (single-message buffer):
//!
//! ```text
//! [0]    : tag      (WireTag as u8)
//! [1]    : version  (PROTOCOL_VERSION)
//! [2..4] : reserved = 0
//! [4..]  : payload  (UTF-8, 0..=MAX_PAYLOAD_LEN bytes)
//! ```
//!
//! Payload length is implied by the buffer length. On a stream the channel
//! prefixes each frame with its length as a u32 BE; that prefix is not part
//! of what this module sees.
//!
//! The codec knows the tag vocabulary but not the conversation: whether a
//! `draw` is acceptable at a given moment is for the caller to decide.

use std::fmt;

use crate::wire_types::{
    validate_payload_len, WireTag, HEADER_LEN, MAX_PAYLOAD_LEN, PROTOCOL_VERSION,
};

/// One `(tag, payload)` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tag: WireTag,
    pub payload: String,
}

impl Frame {
    pub fn new(tag: WireTag, payload: impl Into<String>) -> Self {
        Frame {
            tag,
            payload: payload.into(),
        }
    }

    pub fn start(payload: impl Into<String>) -> Self {
        Frame::new(WireTag::Start, payload)
    }

    pub fn draw(payload: impl Into<String>) -> Self {
        Frame::new(WireTag::Draw, payload)
    }

    pub fn notice(payload: impl Into<String>) -> Self {
        Frame::new(WireTag::Notice, payload)
    }

    pub fn commit(payload: impl Into<String>) -> Self {
        Frame::new(WireTag::Commit, payload)
    }

    pub fn end() -> Self {
        Frame::new(WireTag::End, String::new())
    }

    /// Encoded size without the stream length prefix.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }
}

/// Errors that can arise when encoding/decoding a frame or its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Buffer shorter than the frame header.
    Incomplete,
    /// Unknown tag byte.
    UnknownTag(u8),
    /// Unsupported or mismatched protocol version.
    VersionMismatch(u8),
    /// Payload larger than the frame limit.
    PayloadTooLong { len: usize, max: usize },
    /// Payload bytes are not UTF-8.
    InvalidUtf8,
    /// Payload text does not parse for its tag.
    InvalidPayload { field: &'static str, value: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Incomplete => write!(f, "Frame shorter than its header"),
            ProtocolError::UnknownTag(t) => write!(f, "Unknown message tag: {}", t),
            ProtocolError::VersionMismatch(v) => {
                write!(f, "Protocol version mismatch: got {}, expected {}", v, PROTOCOL_VERSION)
            }
            ProtocolError::PayloadTooLong { len, max } => {
                write!(f, "Payload of {} bytes exceeds limit of {}", len, max)
            }
            ProtocolError::InvalidUtf8 => write!(f, "Payload is not valid UTF-8"),
            ProtocolError::InvalidPayload { field, value } => {
                write!(f, "Invalid {}: {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Encode a single frame.
///
/// The encoded bytes are appended to `out`; nothing is appended on error.
pub fn encode_frame(frame: &Frame, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    let payload = frame.payload.as_bytes();
    if !validate_payload_len(payload.len()) {
        return Err(ProtocolError::PayloadTooLong {
            len: payload.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    out.push(frame.tag as u8);
    out.push(PROTOCOL_VERSION);
    out.extend_from_slice(&[0, 0]); // reserved
    out.extend_from_slice(payload);

    Ok(())
}

/// Read the tag of a frame without touching its payload.
pub fn decode_header(buf: &[u8]) -> Result<WireTag, ProtocolError> {
    if buf.len() < HEADER_LEN {
        return Err(ProtocolError::Incomplete);
    }

    let tag = buf[0];
    let version = buf[1];

    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::VersionMismatch(version));
    }

    WireTag::from_u8(tag).ok_or(ProtocolError::UnknownTag(tag))
}

/// Decode a single frame.
///
/// The buffer must contain exactly one full frame as described above.
pub fn decode_frame(buf: &[u8]) -> Result<Frame, ProtocolError> {
    let tag = decode_header(buf)?;

    let payload_bytes = &buf[HEADER_LEN..];
    if !validate_payload_len(payload_bytes.len()) {
        return Err(ProtocolError::PayloadTooLong {
            len: payload_bytes.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }

    let payload = std::str::from_utf8(payload_bytes)
        .map_err(|_| ProtocolError::InvalidUtf8)?
        .to_string();

    Ok(Frame { tag, payload })
}
