//! i3 IPC client for workspace tracking
//!
//! This module speaks i3's binary IPC protocol over the compositor's Unix
//! socket. It is not a general IPC library: it supports exactly the
//! request/response and subscribe/event patterns i3span needs, with one
//! message in flight at a time.
//!
//! ## Architecture
//!
//! - `IpcTransport`: frames messages over the socket and reassembles
//!   length-prefixed replies and events
//! - `I3Client`: the `GET_WORKSPACES` query, the `SUBSCRIBE` handshake, and
//!   the event frame stream
//! - `I3Error`: error types for IPC operations
//!
//! ## Protocol
//!
//! Each message is a frame: the literal `i3-ipc`, a 32-bit payload length,
//! a 32-bit message type, then a JSON payload of exactly that length.
//! Event frames set the high bit of the message type.

mod client;
mod error;
mod transport;
mod types;

pub use client::{discover_socket_path, I3Client};
pub use error::I3Error;
pub use transport::{Frame, IpcTransport, HEADER_LEN, MAGIC};
pub use types::{
    SubscribeReply, WorkspaceEvent, WorkspaceReply, WorkspaceRef, EVENT_BIT, EVENT_WORKSPACE,
    GET_WORKSPACES, SUBSCRIBE,
};
