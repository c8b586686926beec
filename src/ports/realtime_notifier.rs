//! Realtime notifier port.
//!
//! Publish/subscribe channel keyed by session id, used to announce session
//! start/end to interested viewers. Delivery is fire-and-forget: a notifier
//! failure is logged by callers and never rolls back committed state.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};

/// Channel name for a session's event stream.
pub fn session_channel(id: &SessionId) -> String {
    format!("session-{}", id)
}

/// Fire-and-forget event publication to session channels.
#[async_trait]
pub trait RealtimeNotifier: Send + Sync {
    /// Publish an event to a channel. Delivery is not guaranteed.
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError>;
}
