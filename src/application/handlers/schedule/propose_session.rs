//! ProposeSessionHandler - a teacher proposes a single one-off class.

use std::sync::Arc;

use crate::domain::foundation::{Role, ScheduleId, SessionId, UserId};
use crate::domain::schedule::{
    expand, CreatedBy, RecurrenceType, ScheduleDefinition, ScheduleDraft, ScheduleError,
};
use crate::domain::session::ClassSession;
use crate::ports::{ScheduleRepository, SessionRepository};

/// Command for a teacher to propose a one-off session.
#[derive(Debug, Clone)]
pub struct ProposeSessionCommand {
    pub actor_id: UserId,
    pub actor_role: Role,
    pub draft: ScheduleDraft,
}

/// Result of a successful proposal.
#[derive(Debug, Clone)]
pub struct ProposeSessionResult {
    pub schedule: ScheduleDefinition,
}

/// Handler for teacher session proposals.
pub struct ProposeSessionHandler {
    schedules: Arc<dyn ScheduleRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl ProposeSessionHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self { schedules, sessions }
    }

    pub async fn handle(
        &self,
        cmd: ProposeSessionCommand,
    ) -> Result<ProposeSessionResult, ScheduleError> {
        if cmd.actor_role != Role::Teacher {
            return Err(ScheduleError::Forbidden(
                "Only teachers can propose sessions".to_string(),
            ));
        }
        if cmd.draft.teacher_id != cmd.actor_id {
            return Err(ScheduleError::Forbidden(
                "Teachers can only propose sessions for themselves".to_string(),
            ));
        }

        // Proposals are always a single dated occurrence.
        let mut draft = cmd.draft;
        draft.recurrence = RecurrenceType::OneTime;
        draft.days_of_week = Vec::new();

        let schedule = ScheduleDefinition::new(ScheduleId::new(), draft, CreatedBy::Teacher)?;
        self.schedules.save(&schedule).await?;

        let sessions: Vec<ClassSession> = expand(&schedule)
            .into_iter()
            .map(|d| ClassSession::from_draft(SessionId::new(), d))
            .collect();
        self.sessions.save_all(&sessions).await?;

        tracing::info!(
            schedule_id = %schedule.id(),
            teacher_id = %schedule.teacher_id(),
            "session proposed, awaiting approval"
        );

        Ok(ProposeSessionResult { schedule })
    }
}
