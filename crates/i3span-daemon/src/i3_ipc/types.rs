//! Typed payloads for the i3 IPC protocol
//!
//! i3 payloads are JSON; this module defines the serde views of the messages
//! i3span consumes. Fields the protocol may omit are `Option`, so "field
//! absent" decodes to `None` while a field of the wrong type fails the whole
//! decode.

use serde::Deserialize;

/// Request type: fetch the current workspace list (empty payload)
pub const GET_WORKSPACES: u32 = 0;

/// Request type: subscribe to events (payload is a JSON array of event names)
pub const SUBSCRIBE: u32 = 2;

/// Event frames carry this bit in their message type
pub const EVENT_BIT: u32 = 1 << 31;

/// Event type: a workspace was created, focused, emptied, or otherwise changed
pub const EVENT_WORKSPACE: u32 = EVENT_BIT;

/// One workspace object from a `GET_WORKSPACES` reply
///
/// The reply is a JSON array of these, in i3's own workspace order.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceReply {
    /// The externally assigned workspace number
    pub num: i64,
    /// Display name (usually, but not necessarily, the number as text)
    pub name: String,
    /// Whether this workspace currently has focus
    #[serde(default)]
    pub focused: bool,
}

/// A `workspace` event payload
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceEvent {
    /// Change-kind tag: `init`, `focus`, `empty`, or another tag we ignore
    pub change: String,
    /// The workspace the change applies to
    #[serde(default)]
    pub current: Option<WorkspaceRef>,
    /// The previously focused workspace, present on `focus` events
    #[serde(default)]
    pub old: Option<WorkspaceRef>,
}

/// The `current`/`old` sub-object of a workspace event
///
/// i3 sends a full workspace tree node here; we only read the fields the
/// synchronizer needs, and each may be absent depending on the change kind.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRef {
    #[serde(default)]
    pub num: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Reply to a `SUBSCRIBE` request
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeReply {
    pub success: bool,
}
