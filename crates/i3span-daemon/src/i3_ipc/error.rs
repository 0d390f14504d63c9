//! Error types for i3 IPC operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when communicating with i3
#[derive(Debug, Error)]
pub enum I3Error {
    /// Asking i3 for its socket path failed
    #[error("Failed to discover the i3 socket path: {message}")]
    SocketDiscoveryFailed { message: String },

    /// Failed to connect to the i3 socket
    #[error("Failed to connect to i3 socket at {path}: {source}")]
    ConnectionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to send a message to i3
    #[error("Failed to send message to i3: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Failed to receive a message from i3
    #[error("Failed to receive message from i3: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Connection closed cleanly before the first byte of a new frame
    #[error("Connection to i3 closed")]
    ConnectionClosed,

    /// The peer sent bytes that do not start with the "i3-ipc" magic
    #[error("IPC protocol violated: bad magic {got:?}")]
    BadMagic { got: [u8; 6] },

    /// The stream ended in the middle of a frame
    #[error("IPC protocol violated: frame truncated after {got} of {expected} bytes")]
    TruncatedFrame { expected: usize, got: usize },

    /// A reply's message type did not match the request that was sent
    #[error("IPC protocol violated: expected reply type {expected}, got {got}")]
    UnexpectedReplyType { expected: u32, got: u32 },

    /// i3 rejected the event subscription
    #[error("i3 rejected the event subscription")]
    SubscribeRejected,

    /// Failed to serialize a request payload to JSON
    #[error("Failed to serialize request payload: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    /// Failed to decode a reply or event payload
    #[error("Failed to decode payload: {0}")]
    DecodeFailed(#[source] serde_json::Error),
}

impl I3Error {
    /// Whether this error means the peer broke the framing contract for a
    /// single frame. Such frames are skipped by the event loop; everything
    /// else either ends the loop or is fatal.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. } | Self::TruncatedFrame { .. } | Self::UnexpectedReplyType { .. }
        )
    }
}
