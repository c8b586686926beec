//! UpdateDispositionHandler - records how a past occurrence turned out.

use std::sync::Arc;

use crate::domain::foundation::{Role, SessionId, UserId};
use crate::domain::session::{ClassSession, SessionError, SessionStatus};
use crate::ports::SessionRepository;

/// Command to record a session's administrative outcome.
#[derive(Debug, Clone)]
pub struct UpdateDispositionCommand {
    pub session_id: SessionId,
    pub actor_id: UserId,
    pub actor_role: Role,
    pub disposition: SessionStatus,
}

/// Handler for marking sessions completed or makeup.
pub struct UpdateDispositionHandler {
    sessions: Arc<dyn SessionRepository>,
}

impl UpdateDispositionHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDispositionCommand,
    ) -> Result<ClassSession, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_manage(&cmd.actor_id, cmd.actor_role)?;

        // Cancellation has its own operation so a reason gets recorded.
        match cmd.disposition {
            SessionStatus::Completed => session.mark_completed(),
            SessionStatus::Makeup => session.mark_makeup(),
            other => {
                return Err(SessionError::ValidationFailed {
                    message: format!(
                        "Disposition must be completed or makeup, got {}",
                        other.as_str()
                    ),
                })
            }
        }

        self.sessions.update(&session).await?;
        tracing::info!(
            session_id = %session.id(),
            disposition = session.status().as_str(),
            "session disposition updated"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{
        admin_id, sample_draft, teacher_id, InMemorySessionRepo,
    };
    use crate::domain::foundation::ScheduleId;
    use crate::domain::schedule::{expand, CreatedBy, RecurrenceType, ScheduleDefinition};

    fn seeded_session(repo: &InMemorySessionRepo) -> SessionId {
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            sample_draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        let draft = expand(&schedule).into_iter().next().unwrap();
        let session = ClassSession::from_draft(SessionId::new(), draft);
        let id = *session.id();
        repo.insert(session);
        id
    }

    #[tokio::test]
    async fn teacher_marks_session_completed() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let id = seeded_session(&repo);
        let handler = UpdateDispositionHandler::new(repo.clone());

        let session = handler
            .handle(UpdateDispositionCommand {
                session_id: id,
                actor_id: teacher_id(),
                actor_role: Role::Teacher,
                disposition: SessionStatus::Completed,
            })
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Completed);
    }

    #[tokio::test]
    async fn admin_marks_session_makeup() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let id = seeded_session(&repo);
        let handler = UpdateDispositionHandler::new(repo);

        let session = handler
            .handle(UpdateDispositionCommand {
                session_id: id,
                actor_id: admin_id(),
                actor_role: Role::Admin,
                disposition: SessionStatus::Makeup,
            })
            .await
            .unwrap();

        assert_eq!(session.status(), SessionStatus::Makeup);
    }

    #[tokio::test]
    async fn cancelled_and_scheduled_are_rejected_dispositions() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let id = seeded_session(&repo);
        let handler = UpdateDispositionHandler::new(repo.clone());

        for disposition in [SessionStatus::Cancelled, SessionStatus::Scheduled] {
            let result = handler
                .handle(UpdateDispositionCommand {
                    session_id: id,
                    actor_id: admin_id(),
                    actor_role: Role::Admin,
                    disposition,
                })
                .await;
            assert!(matches!(
                result,
                Err(SessionError::ValidationFailed { .. })
            ));
        }
        assert_eq!(repo.get(&id).unwrap().status(), SessionStatus::Scheduled);
    }

    #[tokio::test]
    async fn other_teacher_is_forbidden() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let id = seeded_session(&repo);
        let handler = UpdateDispositionHandler::new(repo);

        let result = handler
            .handle(UpdateDispositionCommand {
                session_id: id,
                actor_id: UserId::new("teacher-2").unwrap(),
                actor_role: Role::Teacher,
                disposition: SessionStatus::Completed,
            })
            .await;

        assert!(matches!(result, Err(SessionError::Forbidden(_))));
    }
}
