//! i3 IPC client
//!
//! `I3Client` wraps the framing transport with the two exchanges i3span
//! needs: the one-shot `GET_WORKSPACES` query at startup and the
//! `SUBSCRIBE` handshake, after which the connection only delivers event
//! frames.

use std::path::PathBuf;

use tracing::debug;

use super::error::I3Error;
use super::transport::{Frame, IpcTransport};
use super::types::{SubscribeReply, WorkspaceReply, GET_WORKSPACES, SUBSCRIBE};

/// Environment variable i3 sets with its socket path
const I3_SOCKET_ENV: &str = "I3SOCK";

/// Discover the i3 IPC socket path
///
/// Checks `$I3SOCK` first, then falls back to asking i3 itself via
/// `i3 --get-socketpath`.
///
/// # Errors
///
/// Returns `I3Error::SocketDiscoveryFailed` if neither source yields a
/// path, including when i3 is not running.
pub async fn discover_socket_path() -> Result<PathBuf, I3Error> {
    if let Ok(path) = std::env::var(I3_SOCKET_ENV) {
        if !path.is_empty() {
            debug!("Using i3 socket path from ${}", I3_SOCKET_ENV);
            return Ok(PathBuf::from(path));
        }
    }

    let output = tokio::process::Command::new("i3")
        .arg("--get-socketpath")
        .output()
        .await
        .map_err(|e| I3Error::SocketDiscoveryFailed {
            message: format!("could not run `i3 --get-socketpath`: {}", e),
        })?;

    if !output.status.success() {
        return Err(I3Error::SocketDiscoveryFailed {
            message: format!("`i3 --get-socketpath` exited with {}", output.status),
        });
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        return Err(I3Error::SocketDiscoveryFailed {
            message: "`i3 --get-socketpath` printed nothing".to_string(),
        });
    }

    Ok(PathBuf::from(path))
}

/// Client for the i3 IPC socket
///
/// One connection carries both the startup request/response exchanges and,
/// after `subscribe`, the event stream. There is never more than one
/// request in flight.
#[derive(Debug)]
pub struct I3Client {
    transport: IpcTransport,
}

impl I3Client {
    /// Connect to the i3 IPC socket at the given path
    ///
    /// # Errors
    ///
    /// Returns `I3Error::ConnectionFailed` if the connection fails.
    pub async fn connect(path: &std::path::Path) -> Result<Self, I3Error> {
        let transport = IpcTransport::connect(path).await?;
        Ok(Self { transport })
    }

    /// Wrap an existing transport
    ///
    /// Used by tests to run the client against an in-process peer.
    pub fn from_transport(transport: IpcTransport) -> Self {
        Self { transport }
    }

    /// Query the current workspace list
    ///
    /// Sends a zero-payload `GET_WORKSPACES` request and decodes the reply
    /// into workspace records in i3's own order.
    ///
    /// # Errors
    ///
    /// Returns `I3Error::UnexpectedReplyType` if the reply's message type
    /// does not match the request, and `I3Error::DecodeFailed` if the
    /// payload is not a workspace array. Transport errors pass through.
    pub async fn get_workspaces(&mut self) -> Result<Vec<WorkspaceReply>, I3Error> {
        self.transport.send_message(GET_WORKSPACES, &[]).await?;

        let frame = self.transport.recv_message().await?;
        if frame.message_type != GET_WORKSPACES {
            return Err(I3Error::UnexpectedReplyType {
                expected: GET_WORKSPACES,
                got: frame.message_type,
            });
        }

        serde_json::from_slice(&frame.payload).map_err(I3Error::DecodeFailed)
    }

    /// Subscribe to the named event streams
    ///
    /// Sends a `SUBSCRIBE` request with the names as a JSON array and
    /// validates the `{"success":true}` acknowledgement. After this call
    /// the connection delivers event frames; read them with `next_frame`.
    ///
    /// # Errors
    ///
    /// Returns `I3Error::UnexpectedReplyType` if the acknowledgement has
    /// the wrong message type and `I3Error::SubscribeRejected` if i3
    /// answers with `success: false`.
    pub async fn subscribe(&mut self, events: &[&str]) -> Result<(), I3Error> {
        let payload = serde_json::to_vec(events).map_err(I3Error::SerializeFailed)?;
        self.transport.send_message(SUBSCRIBE, &payload).await?;

        let frame = self.transport.recv_message().await?;
        if frame.message_type != SUBSCRIBE {
            return Err(I3Error::UnexpectedReplyType {
                expected: SUBSCRIBE,
                got: frame.message_type,
            });
        }

        let reply: SubscribeReply =
            serde_json::from_slice(&frame.payload).map_err(I3Error::DecodeFailed)?;
        if !reply.success {
            return Err(I3Error::SubscribeRejected);
        }

        debug!(events = ?events, "Subscribed to i3 events");
        Ok(())
    }

    /// Receive the next frame from the connection
    ///
    /// Blocks until a complete frame arrives or the stream closes.
    pub async fn next_frame(&mut self) -> Result<Frame, I3Error> {
        self.transport.recv_message().await
    }
}
