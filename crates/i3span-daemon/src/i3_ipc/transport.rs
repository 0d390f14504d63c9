//! i3 IPC framing over a Unix stream socket
//!
//! Every message on the wire is one frame:
//!
//! ```text
//! ["i3-ipc" 6 bytes][u32 payload length][u32 message type][payload]
//! ```
//!
//! Integers are in host byte order, matching what i3 itself writes. A frame
//! is never partially valid: `recv_message` either returns a complete frame
//! with exactly the declared payload length, or an error describing how the
//! peer broke the contract.

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

use super::error::I3Error;

/// The 6-byte preamble every frame starts with
pub const MAGIC: &[u8; 6] = b"i3-ipc";

/// Frame header size: magic + payload length + message type
pub const HEADER_LEN: usize = MAGIC.len() + 4 + 4;

/// One complete IPC frame as received from i3
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type for replies, event type (high bit set) for events
    pub message_type: u32,
    /// Exactly as many bytes as the frame header declared
    pub payload: Vec<u8>,
}

impl Frame {
    /// Whether this frame is an asynchronous event rather than a reply
    pub fn is_event(&self) -> bool {
        self.message_type & super::types::EVENT_BIT != 0
    }
}

/// Owns the socket connection to i3 and speaks the framing protocol
#[derive(Debug)]
pub struct IpcTransport {
    stream: UnixStream,
}

impl IpcTransport {
    /// Connect to the i3 IPC socket at the given filesystem path
    ///
    /// # Errors
    ///
    /// Returns `I3Error::ConnectionFailed` if the socket cannot be opened
    /// or connected.
    pub async fn connect(path: &Path) -> Result<Self, I3Error> {
        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| I3Error::ConnectionFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self { stream })
    }

    /// Wrap an already connected stream
    ///
    /// Used by tests to drive the framing layer over a socketpair.
    pub fn from_stream(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Send one frame: header and payload as two sequential writes
    ///
    /// # Errors
    ///
    /// Returns `I3Error::SendFailed` if either write does not complete.
    pub async fn send_message(&mut self, message_type: u32, payload: &[u8]) -> Result<(), I3Error> {
        let mut header = [0u8; HEADER_LEN];
        header[..MAGIC.len()].copy_from_slice(MAGIC);
        header[6..10].copy_from_slice(&(payload.len() as u32).to_ne_bytes());
        header[10..14].copy_from_slice(&message_type.to_ne_bytes());

        self.stream
            .write_all(&header)
            .await
            .map_err(I3Error::SendFailed)?;
        self.stream
            .write_all(payload)
            .await
            .map_err(I3Error::SendFailed)?;
        self.stream.flush().await.map_err(I3Error::SendFailed)?;

        Ok(())
    }

    /// Receive one complete frame, blocking until it is fully reassembled
    ///
    /// Short reads are looped over for both the header and the payload.
    ///
    /// # Errors
    ///
    /// Returns `I3Error::ConnectionClosed` on a clean EOF before any byte of
    /// a new frame. Returns `I3Error::BadMagic` if the preamble does not
    /// match, and `I3Error::TruncatedFrame` if the stream ends mid-header or
    /// mid-payload. Read failures surface as `I3Error::ReceiveFailed` with
    /// the underlying error preserved.
    pub async fn recv_message(&mut self) -> Result<Frame, I3Error> {
        let mut header = [0u8; HEADER_LEN];
        self.read_full(&mut header, true).await?;

        if &header[..MAGIC.len()] != MAGIC {
            let mut got = [0u8; 6];
            got.copy_from_slice(&header[..MAGIC.len()]);
            return Err(I3Error::BadMagic { got });
        }

        let payload_length = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]);
        let message_type = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);

        let mut payload = vec![0u8; payload_length as usize];
        self.read_full(&mut payload, false).await?;

        Ok(Frame {
            message_type,
            payload,
        })
    }

    /// Read exactly `buf.len()` bytes, looping over short reads
    ///
    /// `fresh_frame` marks the read of a new frame's header: a clean EOF on
    /// the very first byte is then a normal `ConnectionClosed` rather than a
    /// truncated frame. Interrupted reads are retried transparently.
    async fn read_full(&mut self, buf: &mut [u8], fresh_frame: bool) -> Result<(), I3Error> {
        let mut read_bytes = 0;

        while read_bytes < buf.len() {
            match self.stream.read(&mut buf[read_bytes..]).await {
                Ok(0) => {
                    if fresh_frame && read_bytes == 0 {
                        return Err(I3Error::ConnectionClosed);
                    }
                    return Err(I3Error::TruncatedFrame {
                        expected: buf.len(),
                        got: read_bytes,
                    });
                }
                Ok(n) => read_bytes += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(I3Error::ReceiveFailed(e)),
            }
        }

        Ok(())
    }
}
