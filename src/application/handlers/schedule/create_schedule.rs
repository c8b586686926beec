//! CreateScheduleHandler - persists a definition and its expanded sessions.

use std::sync::Arc;

use crate::domain::foundation::{ScheduleId, SessionId};
use crate::domain::schedule::{
    expand, CreatedBy, ScheduleDefinition, ScheduleDraft, ScheduleError,
};
use crate::domain::session::ClassSession;
use crate::ports::{ScheduleRepository, SessionRepository};

/// Command to create a schedule definition.
#[derive(Debug, Clone)]
pub struct CreateScheduleCommand {
    pub draft: ScheduleDraft,
    pub created_by: CreatedBy,
}

/// Result of successful schedule creation.
#[derive(Debug, Clone)]
pub struct CreateScheduleResult {
    pub schedule: ScheduleDefinition,
    pub session_count: usize,
}

/// Handler for creating schedules.
pub struct CreateScheduleHandler {
    schedules: Arc<dyn ScheduleRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl CreateScheduleHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self { schedules, sessions }
    }

    pub async fn handle(
        &self,
        cmd: CreateScheduleCommand,
    ) -> Result<CreateScheduleResult, ScheduleError> {
        // Validation happens in the constructor, before anything persists.
        let schedule =
            ScheduleDefinition::new(ScheduleId::new(), cmd.draft, cmd.created_by)?;

        self.schedules.save(&schedule).await?;

        // TODO: wrap the definition insert and the session bulk insert in a
        // single sqlx transaction; a failure between them leaves an orphan
        // definition with zero sessions.
        let sessions: Vec<ClassSession> = expand(&schedule)
            .into_iter()
            .map(|draft| ClassSession::from_draft(SessionId::new(), draft))
            .collect();

        self.sessions.save_all(&sessions).await?;

        tracing::info!(
            schedule_id = %schedule.id(),
            sessions = sessions.len(),
            recurrence = schedule.recurrence().as_str(),
            "schedule created"
        );

        Ok(CreateScheduleResult {
            schedule,
            session_count: sessions.len(),
        })
    }
}
