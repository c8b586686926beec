//! CancelSessionHandler - cancels a single occurrence.

use std::sync::Arc;

use crate::domain::foundation::{Role, SessionId, UserId};
use crate::domain::session::{ClassSession, SessionError};
use crate::ports::SessionRepository;

/// Command to cancel one session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub reason: Option<String>,
}

/// Handler for cancelling individual sessions.
pub struct CancelSessionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl CancelSessionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: CancelSessionCommand) -> Result<ClassSession, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_manage(&cmd.actor_id, cmd.actor_role)?;
        session.cancel(cmd.reason);
        self.sessions.update(&session).await?;

        tracing::info!(session_id = %session.id(), "session cancelled");
        Ok(session)
    }
}
