//! Per-session broadcast rooms for connected viewers.
//!
//! Each session with at least one viewer gets a `tokio::broadcast` channel.
//! `SessionRooms` also implements `RealtimeNotifier`, so a single-process
//! deployment can wire the handlers straight to its own websocket clients
//! without Redis in between.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::RealtimeNotifier;

use super::messages::SessionEvent;

/// Unique identifier for a WebSocket client connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Manages broadcast rooms keyed by session id.
///
/// Broadcasts (reads) vastly outnumber joins and leaves, so the registry
/// sits behind an `RwLock`.
pub struct SessionRooms {
    rooms: RwLock<HashMap<SessionId, broadcast::Sender<SessionEvent>>>,
    /// client_id → session_id for O(1) cleanup on disconnect.
    client_sessions: RwLock<HashMap<ClientId, SessionId>>,
    channel_capacity: usize,
}

impl SessionRooms {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            client_sessions: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Default capacity of 128 buffered events per room.
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a client to a session room, creating the room on first join.
    pub async fn join(
        &self,
        session_id: &SessionId,
        client_id: ClientId,
    ) -> broadcast::Receiver<SessionEvent> {
        let mut rooms = self.rooms.write().await;
        let sender = rooms.entry(*session_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.client_sessions
            .write()
            .await
            .insert(client_id, *session_id);

        sender.subscribe()
    }

    /// Remove a client, dropping the room once it has no receivers left.
    pub async fn leave(&self, client_id: &ClientId) {
        let mut client_sessions = self.client_sessions.write().await;

        if let Some(session_id) = client_sessions.remove(client_id) {
            let rooms = self.rooms.read().await;
            if let Some(sender) = rooms.get(&session_id) {
                if sender.receiver_count() == 0 {
                    drop(rooms);
                    self.rooms.write().await.remove(&session_id);
                }
            }
        }
    }

    /// Broadcast an event to every viewer of a session. No-op when the
    /// room has no viewers.
    pub async fn broadcast(&self, session_id: &SessionId, event: SessionEvent) {
        let rooms = self.rooms.read().await;
        if let Some(sender) = rooms.get(session_id) {
            let _ = sender.send(event);
        }
    }

    /// Viewers currently in a session's room.
    pub async fn viewer_count(&self, session_id: &SessionId) -> usize {
        self.rooms
            .read()
            .await
            .get(session_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Total connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.client_sessions.read().await.len()
    }
}

impl Default for SessionRooms {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl RealtimeNotifier for SessionRooms {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError> {
        // Channels are "session-<uuid>"; anything else has no room here.
        let Some(session_id) = channel
            .strip_prefix("session-")
            .and_then(|raw| raw.parse::<SessionId>().ok())
        else {
            tracing::debug!(channel, "ignoring publish to non-session channel");
            return Ok(());
        };

        self.broadcast(
            &session_id,
            SessionEvent {
                event: event.to_string(),
                payload,
            },
        )
        .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn joined_client_receives_broadcast() {
        let rooms = SessionRooms::with_default_capacity();
        let session_id = SessionId::new();
        let mut rx = rooms.join(&session_id, ClientId::new()).await;

        rooms
            .broadcast(
                &session_id,
                SessionEvent {
                    event: "session:started".to_string(),
                    payload: serde_json::json!({}),
                },
            )
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, "session:started");
    }

    #[tokio::test]
    async fn publish_routes_through_session_channel_name() {
        let rooms = SessionRooms::with_default_capacity();
        let session_id = SessionId::new();
        let mut rx = rooms.join(&session_id, ClientId::new()).await;

        rooms
            .publish(
                &crate::ports::session_channel(&session_id),
                "session:ended",
                serde_json::json!({"sessionId": session_id}),
            )
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, "session:ended");
    }

    #[tokio::test]
    async fn publish_to_unknown_channel_is_a_no_op() {
        let rooms = SessionRooms::with_default_capacity();
        let result = rooms
            .publish("not-a-session", "session:started", serde_json::json!({}))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn rooms_are_isolated_per_session() {
        let rooms = SessionRooms::with_default_capacity();
        let watched = SessionId::new();
        let other = SessionId::new();
        let mut rx = rooms.join(&watched, ClientId::new()).await;

        rooms
            .broadcast(
                &other,
                SessionEvent {
                    event: "session:started".to_string(),
                    payload: serde_json::json!({}),
                },
            )
            .await;

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn leave_cleans_up_empty_rooms() {
        let rooms = SessionRooms::with_default_capacity();
        let session_id = SessionId::new();
        let client = ClientId::new();
        let rx = rooms.join(&session_id, client).await;
        assert_eq!(rooms.viewer_count(&session_id).await, 1);

        drop(rx);
        rooms.leave(&client).await;
        assert_eq!(rooms.viewer_count(&session_id).await, 0);
        assert_eq!(rooms.total_client_count().await, 0);
    }
}
