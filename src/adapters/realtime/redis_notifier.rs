//! Redis-backed realtime notifier for multi-server deployments.
//!
//! Publishes session events with PUBLISH on the `session-<id>` channel.
//! Subscribers (other server instances bridging to their own websocket
//! clients) receive a JSON envelope `{ "event": ..., "payload": ... }`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::RealtimeNotifier;

/// Redis PUBLISH implementation of RealtimeNotifier.
#[derive(Clone)]
pub struct RedisNotifier {
    conn: MultiplexedConnection,
}

impl RedisNotifier {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RealtimeNotifier for RedisNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError> {
        let envelope = serde_json::json!({
            "event": event,
            "payload": payload,
        });
        let message = envelope.to_string();

        let mut conn = self.conn.clone();
        let _receivers: i64 = conn.publish(channel, message).await.map_err(
            |e: redis::RedisError| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Redis publish failed: {}", e),
                )
            },
        )?;

        Ok(())
    }
}
