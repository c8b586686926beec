//! StartSessionHandler - flips a session live and announces it.

use std::sync::Arc;

use crate::domain::foundation::{Role, SessionId, UserId};
use crate::domain::session::{ClassSession, SessionError};
use crate::ports::{session_channel, DirectoryReader, RealtimeNotifier, SessionRepository};

/// Command to start a session's live phase.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub session_id: SessionId,
    pub actor_id: UserId,
    pub actor_role: Role,
}

/// Result of a start request.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: ClassSession,
    /// True when the session was live before this request; nothing was
    /// changed or announced in that case.
    pub already_live: bool,
}

/// Handler for starting live sessions.
pub struct StartSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    directory: Arc<dyn DirectoryReader>,
    notifier: Arc<dyn RealtimeNotifier>,
}

impl StartSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        directory: Arc<dyn DirectoryReader>,
        notifier: Arc<dyn RealtimeNotifier>,
    ) -> Self {
        Self {
            sessions,
            directory,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, SessionError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_manage(&cmd.actor_id, cmd.actor_role)?;

        if !session.start_live() {
            return Ok(StartSessionResult {
                session,
                already_live: true,
            });
        }
        self.sessions.update(&session).await?;

        let presenter = self.presenter_name(&cmd, &session).await;
        let course_name = match self.directory.course_name(session.course_id()).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(error = %err, "course name lookup failed");
                None
            }
        };

        let payload = serde_json::json!({
            "sessionId": session.id(),
            "title": session.title(),
            "presenter": presenter,
            "courseName": course_name,
            "roomId": session.room_id(),
        });
        if let Err(err) = self
            .notifier
            .publish(&session_channel(session.id()), "session:started", payload)
            .await
        {
            tracing::warn!(session_id = %session.id(), error = %err, "start announcement failed");
        }

        tracing::info!(session_id = %session.id(), "session started");
        Ok(StartSessionResult {
            session,
            already_live: false,
        })
    }

    async fn presenter_name(&self, cmd: &StartSessionCommand, session: &ClassSession) -> String {
        if cmd.actor_role == Role::Admin {
            return "Admin".to_string();
        }
        match self
            .directory
            .display_name(Role::Teacher, session.teacher_id())
            .await
        {
            Ok(Some(name)) => name,
            Ok(None) => "Teacher".to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "presenter name lookup failed");
                "Teacher".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{
        admin_id, sample_draft, teacher_id, InMemorySessionRepo, RecordingNotifier,
        StubDirectory,
    };
    use crate::domain::foundation::ScheduleId;
    use crate::domain::schedule::{expand, CreatedBy, RecurrenceType, ScheduleDefinition};
    use crate::domain::session::LiveStatus;

    fn seeded_session(repo: &InMemorySessionRepo) -> ClassSession {
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            sample_draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        let draft = expand(&schedule).into_iter().next().unwrap();
        let session = ClassSession::from_draft(SessionId::new(), draft);
        repo.insert(session.clone());
        session
    }

    #[tokio::test]
    async fn teacher_start_goes_live_and_announces() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let directory = Arc::new(
            StubDirectory::new()
                .with_name(&teacher_id(), "Ms. Rivera")
                .with_course(*session.course_id(), "Algebra"),
        );
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = StartSessionHandler::new(repo.clone(), directory, notifier.clone());

        let result = handler
            .handle(StartSessionCommand {
                session_id: *session.id(),
                actor_id: teacher_id(),
                actor_role: Role::Teacher,
            })
            .await
            .unwrap();

        assert!(!result.already_live);
        assert_eq!(
            repo.get(session.id()).unwrap().live_status(),
            LiveStatus::Live
        );

        let events = notifier.published();
        assert_eq!(events.len(), 1);
        let (channel, event, payload) = &events[0];
        assert_eq!(channel, &session_channel(session.id()));
        assert_eq!(event, "session:started");
        assert_eq!(payload["presenter"], "Ms. Rivera");
        assert_eq!(payload["courseName"], "Algebra");
        assert_eq!(payload["title"], "Algebra II");
        assert_eq!(payload["roomId"], session.room_id().unwrap());
    }

    #[tokio::test]
    async fn admin_start_uses_admin_presenter_name() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = StartSessionHandler::new(
            repo,
            Arc::new(StubDirectory::new()),
            notifier.clone(),
        );

        handler
            .handle(StartSessionCommand {
                session_id: *session.id(),
                actor_id: admin_id(),
                actor_role: Role::Admin,
            })
            .await
            .unwrap();

        assert_eq!(notifier.published()[0].2["presenter"], "Admin");
    }

    #[tokio::test]
    async fn missing_directory_entry_falls_back_to_generic_name() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = StartSessionHandler::new(
            repo,
            Arc::new(StubDirectory::new()),
            notifier.clone(),
        );

        handler
            .handle(StartSessionCommand {
                session_id: *session.id(),
                actor_id: teacher_id(),
                actor_role: Role::Teacher,
            })
            .await
            .unwrap();

        let payload = &notifier.published()[0].2;
        assert_eq!(payload["presenter"], "Teacher");
        assert!(payload["courseName"].is_null());
    }

    #[tokio::test]
    async fn starting_a_live_session_reports_already_live_without_announcing() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = StartSessionHandler::new(
            repo.clone(),
            Arc::new(StubDirectory::new()),
            notifier.clone(),
        );

        let cmd = StartSessionCommand {
            session_id: *session.id(),
            actor_id: teacher_id(),
            actor_role: Role::Teacher,
        };
        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert!(!first.already_live);
        assert!(second.already_live);
        assert_eq!(notifier.published().len(), 1);
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_the_start() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let handler = StartSessionHandler::new(
            repo.clone(),
            Arc::new(StubDirectory::new()),
            Arc::new(RecordingNotifier::failing()),
        );

        let result = handler
            .handle(StartSessionCommand {
                session_id: *session.id(),
                actor_id: teacher_id(),
                actor_role: Role::Teacher,
            })
            .await
            .unwrap();

        assert!(!result.already_live);
        assert_eq!(
            repo.get(session.id()).unwrap().live_status(),
            LiveStatus::Live
        );
    }

    #[tokio::test]
    async fn student_cannot_start_a_session() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo);
        let handler = StartSessionHandler::new(
            repo,
            Arc::new(StubDirectory::new()),
            Arc::new(RecordingNotifier::new()),
        );

        let result = handler
            .handle(StartSessionCommand {
                session_id: *session.id(),
                actor_id: UserId::new("student-1").unwrap(),
                actor_role: Role::Student,
            })
            .await;

        assert!(matches!(result, Err(SessionError::Forbidden(_))));
    }
}
