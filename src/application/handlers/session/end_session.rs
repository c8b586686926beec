//! EndSessionHandler - ends a live session and announces it.

use std::sync::Arc;

use crate::domain::foundation::{Role, SessionId, UserId};
use crate::domain::session::{ClassSession, SessionError};
use crate::ports::{session_channel, RealtimeNotifier, SessionRepository};

/// Command to end a session's live phase.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
    pub actor_id: UserId,
    pub actor_role: Role,
}

/// Result of an end request.
#[derive(Debug, Clone)]
pub struct EndSessionResult {
    pub session: ClassSession,
    /// True when the session had already ended; nothing was announced.
    pub already_ended: bool,
}

/// Handler for ending live sessions.
pub struct EndSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    notifier: Arc<dyn RealtimeNotifier>,
}

impl EndSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, notifier: Arc<dyn RealtimeNotifier>) -> Self {
        Self { sessions, notifier }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<EndSessionResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_manage(&cmd.actor_id, cmd.actor_role)?;

        if !session.end_live() {
            return Ok(EndSessionResult {
                session,
                already_ended: true,
            });
        }
        self.sessions.update(&session).await?;

        let payload = serde_json::json!({ "sessionId": session.id() });
        if let Err(err) = self
            .notifier
            .publish(&session_channel(session.id()), "session:ended", payload)
            .await
        {
            tracing::warn!(session_id = %session.id(), error = %err, "end announcement failed");
        }

        tracing::info!(session_id = %session.id(), "session ended");
        Ok(EndSessionResult {
            session,
            already_ended: false,
        })
    }
}
