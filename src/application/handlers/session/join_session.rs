//! JoinSessionHandler - mints a join URL for the session's room.

use std::sync::Arc;

use crate::domain::foundation::{Role, SessionId, UserId};
use crate::domain::session::SessionError;
use crate::ports::{DirectoryReader, RoomProvisioningClient, SessionRepository};

/// Command to join a session's live room.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub actor_id: UserId,
    pub actor_role: Role,
}

/// A minted join URL plus the identity it was minted for.
#[derive(Debug, Clone)]
pub struct JoinSessionResult {
    pub join_url: String,
    pub room_id: String,
    pub display_name: String,
    pub is_presenter: bool,
}

/// Handler for joining live session rooms.
pub struct JoinSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    directory: Arc<dyn DirectoryReader>,
    rooms: Arc<dyn RoomProvisioningClient>,
}

impl JoinSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        directory: Arc<dyn DirectoryReader>,
        rooms: Arc<dyn RoomProvisioningClient>,
    ) -> Self {
        Self {
            sessions,
            directory,
            rooms,
        }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinSessionResult, SessionError> {
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(SessionError::NotFound(cmd.session_id))?;

        session.authorize_join(&cmd.actor_id, cmd.actor_role)?;

        let room_id = session
            .room_id()
            .ok_or(SessionError::MissingRoomId)?
            .to_string();

        let display_name = self.display_name(&cmd).await;
        let is_presenter = cmd.actor_role.is_presenter();
        let join_url = self
            .rooms
            .create_join_url(&room_id, &display_name, is_presenter)
            .await?;

        tracing::info!(
            session_id = %session.id(),
            role = cmd.actor_role.as_str(),
            "join url issued"
        );

        Ok(JoinSessionResult {
            join_url,
            room_id,
            display_name,
            is_presenter,
        })
    }

    async fn display_name(&self, cmd: &JoinSessionCommand) -> String {
        let fallback = match cmd.actor_role {
            Role::Admin => return "Admin".to_string(),
            Role::Teacher => "Teacher",
            Role::Student | Role::Parent => "Student",
        };
        match self
            .directory
            .display_name(cmd.actor_role, &cmd.actor_id)
            .await
        {
            Ok(Some(name)) => name,
            Ok(None) => fallback.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "display name lookup failed");
                fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{
        admin_id, sample_draft, student_id, teacher_id, InMemorySessionRepo, StubDirectory,
        StubRoomClient,
    };
    use crate::domain::foundation::ScheduleId;
    use crate::domain::schedule::{expand, CreatedBy, RecurrenceType, ScheduleDefinition};
    use crate::domain::session::ClassSession;

    fn seeded_session(repo: &InMemorySessionRepo, live: bool) -> ClassSession {
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            sample_draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        let draft = expand(&schedule).into_iter().next().unwrap();
        let mut session = ClassSession::from_draft(SessionId::new(), draft);
        if live {
            session.start_live();
        }
        repo.insert(session.clone());
        session
    }

    fn handler(
        repo: Arc<InMemorySessionRepo>,
        directory: StubDirectory,
    ) -> JoinSessionHandler {
        JoinSessionHandler::new(repo, Arc::new(directory), Arc::new(StubRoomClient::new()))
    }

    #[tokio::test]
    async fn teacher_joins_as_presenter_with_directory_name() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, false);
        let handler = handler(
            repo,
            StubDirectory::new().with_name(&teacher_id(), "Ms. Rivera"),
        );

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: teacher_id(),
                actor_role: Role::Teacher,
            })
            .await
            .unwrap();

        assert!(result.is_presenter);
        assert_eq!(result.display_name, "Ms. Rivera");
        assert_eq!(result.room_id, session.room_id().unwrap());
        assert!(result.join_url.contains(&result.room_id));
        assert!(result.join_url.contains("presenter=true"));
    }

    #[tokio::test]
    async fn student_joins_live_session_as_viewer() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, true);
        let handler = handler(
            repo,
            StubDirectory::new().with_name(&student_id(), "Jamie"),
        );

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: student_id(),
                actor_role: Role::Student,
            })
            .await
            .unwrap();

        assert!(!result.is_presenter);
        assert_eq!(result.display_name, "Jamie");
    }

    #[tokio::test]
    async fn student_is_gated_until_session_is_live() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, false);
        let handler = handler(repo, StubDirectory::new());

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: student_id(),
                actor_role: Role::Student,
            })
            .await;

        match result {
            Err(SessionError::Forbidden(message)) => assert_eq!(
                message,
                "Session is not live yet. Wait for the teacher to start."
            ),
            other => panic!("expected forbidden, got {:?}", other.map(|r| r.join_url)),
        }
    }

    #[tokio::test]
    async fn admin_joins_with_fixed_display_name() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, false);
        let handler = handler(repo, StubDirectory::new());

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: admin_id(),
                actor_role: Role::Admin,
            })
            .await
            .unwrap();

        assert!(result.is_presenter);
        assert_eq!(result.display_name, "Admin");
    }

    #[tokio::test]
    async fn session_without_room_id_reports_missing_room() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, false);
        // Simulate a legacy row persisted before room ids were derived.
        let stripped = ClassSession::reconstitute(
            *session.id(),
            session.schedule_id().copied(),
            session.title().to_string(),
            session.date(),
            session.start_time(),
            session.end_time(),
            None,
            session.status(),
            session.live_status(),
            None,
            None,
            *session.course_id(),
            session.teacher_id().clone(),
            session.student_id().cloned(),
            None,
            session.created_at(),
            session.updated_at(),
        );
        repo.insert(stripped);
        let handler = handler(repo, StubDirectory::new());

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: admin_id(),
                actor_role: Role::Admin,
            })
            .await;

        assert!(matches!(result, Err(SessionError::MissingRoomId)));
    }

    #[tokio::test]
    async fn provider_outage_surfaces_as_provisioning_error() {
        let repo = Arc::new(InMemorySessionRepo::new());
        let session = seeded_session(&repo, false);
        let handler = JoinSessionHandler::new(
            repo,
            Arc::new(StubDirectory::new()),
            Arc::new(StubRoomClient::failing()),
        );

        let result = handler
            .handle(JoinSessionCommand {
                session_id: *session.id(),
                actor_id: admin_id(),
                actor_role: Role::Admin,
            })
            .await;

        assert!(matches!(result, Err(SessionError::Provisioning(_))));
    }
}
