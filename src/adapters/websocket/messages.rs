//! WebSocket message types for the live session stream.

use serde::{Deserialize, Serialize};

// ============================================
// Server → Client Messages
// ============================================

/// All message types sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established and joined to the session room.
    Connected(ConnectedMessage),

    /// A session event (started, ended) relayed from the room.
    Event(SessionEvent),

    /// Heartbeat response.
    Pong,
}

/// Sent once after a client joins a session room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub session_id: String,
    pub client_id: String,
}

/// One event broadcast to every viewer of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    /// Event name, e.g. `session:started` or `session:ended`.
    pub event: String,
    pub payload: serde_json::Value,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types accepted from clients.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Application-level heartbeat.
    Ping,
}
