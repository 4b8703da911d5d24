//! Length-prefixed frame transport.
//!
//! On the stream every frame is preceded by its length as a u32 BE:
//!
//! ```text
//! [len: u32 BE][tag][version][0, 0][payload...]
//! ```
//!
//! The two halves are independent: a [`ChannelSender`] can be cloned and
//! shared between the front-end and the listener, while the single
//! [`ChannelReceiver`] lives in the listener task.

use std::sync::Arc;

use bytes::{BufMut, BytesMut};
use scrabble_protocol::binary_codec::{decode_frame, encode_frame, Frame};
use scrabble_protocol::wire_types::{WireTag, HEADER_LEN, MAX_PAYLOAD_LEN};
use scrabble_protocol::ProtocolError;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::ChannelError;

const LEN_PREFIX: usize = 4;

struct SenderInner<W> {
    writer: W,
    write_buffer: BytesMut,
}

/// Writing half of a channel.
pub struct ChannelSender<W> {
    inner: Arc<Mutex<SenderInner<W>>>,
}

impl<W> Clone for ChannelSender<W> {
    fn clone(&self) -> Self {
        ChannelSender {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> ChannelSender<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        ChannelSender {
            inner: Arc::new(Mutex::new(SenderInner {
                writer,
                write_buffer: BytesMut::with_capacity(4 * (LEN_PREFIX + HEADER_LEN + MAX_PAYLOAD_LEN)),
            })),
        }
    }

    /// Send one frame and wait until it has been handed to the transport.
    pub async fn send(&self, tag: WireTag, payload: &str) -> Result<(), ChannelError> {
        self.send_batch(&[Frame::new(tag, payload)]).await
    }

    /// Send several frames back to back.
    ///
    /// The whole batch is encoded before anything is written, so an
    /// oversize payload rejects the batch without touching the stream. No
    /// other send on this channel can interleave with it.
    pub async fn send_batch(&self, frames: &[Frame]) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().await;
        let SenderInner {
            writer,
            write_buffer,
        } = &mut *inner;

        write_buffer.clear();
        let mut scratch = Vec::with_capacity(HEADER_LEN + MAX_PAYLOAD_LEN);
        for frame in frames {
            scratch.clear();
            encode_frame(frame, &mut scratch)?;
            write_buffer.put_u32(scratch.len() as u32);
            write_buffer.extend_from_slice(&scratch);
        }

        writer.write_all(&write_buffer[..]).await?;
        writer.flush().await?;

        for frame in frames {
            debug!(tag = %frame.tag, payload = %frame.payload, "sent frame");
        }
        Ok(())
    }

    /// Close the writing direction; the peer's next `receive` sees `Closed`.
    pub async fn shutdown(&self) -> Result<(), ChannelError> {
        let mut inner = self.inner.lock().await;
        inner.writer.shutdown().await?;
        Ok(())
    }
}

/// Reading half of a channel.
pub struct ChannelReceiver<R> {
    reader: R,
    read_buffer: BytesMut,
}

impl<R> ChannelReceiver<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        ChannelReceiver {
            reader,
            read_buffer: BytesMut::with_capacity(HEADER_LEN + MAX_PAYLOAD_LEN),
        }
    }

    /// Wait for the next frame.
    ///
    /// A payload longer than `max_len` yields `Truncated`; the frame is
    /// skipped so the stream stays aligned. The tag is not checked against
    /// any expectation here.
    pub async fn receive(&mut self, max_len: usize) -> Result<Frame, ChannelError> {
        let frame_len = self.reader.read_u32().await? as usize;

        if frame_len < HEADER_LEN {
            self.skip(frame_len).await?;
            return Err(ProtocolError::Incomplete.into());
        }

        let payload_len = frame_len - HEADER_LEN;
        if payload_len > max_len {
            self.skip(frame_len).await?;
            return Err(ChannelError::Truncated {
                len: payload_len,
                max: max_len,
            });
        }

        self.read_buffer.clear();
        self.read_buffer.resize(frame_len, 0);
        self.reader.read_exact(&mut self.read_buffer[..]).await?;

        let frame = decode_frame(&self.read_buffer)?;
        debug!(tag = %frame.tag, payload = %frame.payload, "received frame");
        Ok(frame)
    }

    async fn skip(&mut self, len: usize) -> Result<(), ChannelError> {
        let mut limited = (&mut self.reader).take(len as u64);
        let skipped = tokio::io::copy(&mut limited, &mut tokio::io::sink()).await?;
        if skipped < len as u64 {
            return Err(ChannelError::Closed);
        }
        Ok(())
    }
}

pub type TcpSender = ChannelSender<OwnedWriteHalf>;
pub type TcpReceiver = ChannelReceiver<OwnedReadHalf>;

/// Split a connected stream into the two channel halves.
pub fn from_tcp(stream: TcpStream) -> Result<(TcpReceiver, TcpSender), ChannelError> {
    stream.set_nodelay(true)?;
    let (read_half, write_half) = stream.into_split();
    Ok((ChannelReceiver::new(read_half), ChannelSender::new(write_half)))
}
