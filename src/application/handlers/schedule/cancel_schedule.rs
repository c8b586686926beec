//! CancelScheduleHandler - cancels a definition and its future sessions.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::ScheduleId;
use crate::domain::schedule::{ScheduleDefinition, ScheduleError};
use crate::domain::session::SessionStatus;
use crate::ports::{ScheduleRepository, SessionRepository};

/// Reason recorded on cascaded sessions when none is given.
pub const DEFAULT_SCHEDULE_CANCEL_REASON: &str = "Schedule cancelled by admin";

/// Command to cancel a schedule definition.
#[derive(Debug, Clone)]
pub struct CancelScheduleCommand {
    pub schedule_id: ScheduleId,
    pub reason: Option<String>,
}

/// Result of a schedule cancellation.
#[derive(Debug, Clone)]
pub struct CancelScheduleResult {
    pub schedule: ScheduleDefinition,
    pub cancelled_sessions: usize,
}

/// Handler for cancelling schedules with cascade to future sessions.
pub struct CancelScheduleHandler {
    schedules: Arc<dyn ScheduleRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl CancelScheduleHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self { schedules, sessions }
    }

    pub async fn handle(
        &self,
        cmd: CancelScheduleCommand,
    ) -> Result<CancelScheduleResult, ScheduleError> {
        let mut schedule = self
            .schedules
            .find_by_id(&cmd.schedule_id)
            .await?
            .ok_or(ScheduleError::NotFound(cmd.schedule_id))?;

        schedule.cancel()?;
        self.schedules.update(&schedule).await?;

        let reason = cmd
            .reason
            .unwrap_or_else(|| DEFAULT_SCHEDULE_CANCEL_REASON.to_string());

        // Cascade only to upcoming occurrences still in their default state.
        // Past, completed, makeup and already-cancelled sessions keep their
        // record.
        let today = Utc::now().date_naive();
        let mut cancelled = 0usize;
        for mut session in self.sessions.find_by_schedule(schedule.id()).await? {
            if session.date() >= today && session.status() == SessionStatus::Scheduled {
                session.cancel(Some(reason.clone()));
                self.sessions.update(&session).await?;
                cancelled += 1;
            }
        }

        tracing::info!(
            schedule_id = %schedule.id(),
            cancelled_sessions = cancelled,
            "schedule cancelled"
        );

        Ok(CancelScheduleResult {
            schedule,
            cancelled_sessions: cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{
        sample_draft, student_id, teacher_id, InMemoryScheduleRepo, InMemorySessionRepo,
    };
    use crate::domain::foundation::{CourseId, SessionId};
    use crate::domain::schedule::{CreatedBy, RecurrenceType, ScheduleStatus, SessionDraft};
    use crate::domain::session::ClassSession;
    use chrono::{Duration, NaiveTime, Utc};

    fn session_on(schedule_id: ScheduleId, days_from_today: i64) -> ClassSession {
        ClassSession::from_draft(
            SessionId::new(),
            SessionDraft {
                schedule_id,
                title: "Algebra II".to_string(),
                date: Utc::now().date_naive() + Duration::days(days_from_today),
                start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
                course_id: CourseId::new(),
                teacher_id: teacher_id(),
                student_id: Some(student_id()),
                enrollment_id: None,
            },
        )
    }

    fn seeded() -> (
        Arc<InMemoryScheduleRepo>,
        Arc<InMemorySessionRepo>,
        ScheduleId,
    ) {
        let schedules = Arc::new(InMemoryScheduleRepo::new());
        let sessions = Arc::new(InMemorySessionRepo::new());
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            sample_draft(RecurrenceType::Weekly, vec![chrono::Weekday::Mon]),
            CreatedBy::Admin,
        )
        .unwrap();
        let id = *schedule.id();
        schedules.insert(schedule);
        (schedules, sessions, id)
    }

    #[tokio::test]
    async fn cancels_schedule_and_future_scheduled_sessions() {
        let (schedules, sessions, id) = seeded();
        sessions.insert(session_on(id, 1));
        sessions.insert(session_on(id, 7));

        let handler = CancelScheduleHandler::new(schedules.clone(), sessions.clone());
        let result = handler
            .handle(CancelScheduleCommand {
                schedule_id: id,
                reason: None,
            })
            .await
            .unwrap();

        assert_eq!(result.schedule.status(), ScheduleStatus::Cancelled);
        assert_eq!(result.cancelled_sessions, 2);
        for session in sessions.all() {
            assert_eq!(session.status(), SessionStatus::Cancelled);
            assert_eq!(
                session.cancellation_reason(),
                Some(DEFAULT_SCHEDULE_CANCEL_REASON)
            );
        }
    }

    #[tokio::test]
    async fn past_sessions_are_left_untouched() {
        let (schedules, sessions, id) = seeded();
        let past = session_on(id, -7);
        let past_id = *past.id();
        sessions.insert(past);
        sessions.insert(session_on(id, 7));

        let handler = CancelScheduleHandler::new(schedules, sessions.clone());
        let result = handler
            .handle(CancelScheduleCommand {
                schedule_id: id,
                reason: None,
            })
            .await
            .unwrap();

        assert_eq!(result.cancelled_sessions, 1);
        assert_eq!(
            sessions.get(&past_id).unwrap().status(),
            SessionStatus::Scheduled
        );
    }

    #[tokio::test]
    async fn completed_sessions_keep_their_status() {
        let (schedules, sessions, id) = seeded();
        let mut done = session_on(id, 3);
        done.mark_completed();
        let done_id = *done.id();
        sessions.insert(done);

        let handler = CancelScheduleHandler::new(schedules, sessions.clone());
        let result = handler
            .handle(CancelScheduleCommand {
                schedule_id: id,
                reason: None,
            })
            .await
            .unwrap();

        assert_eq!(result.cancelled_sessions, 0);
        assert_eq!(
            sessions.get(&done_id).unwrap().status(),
            SessionStatus::Completed
        );
    }

    #[tokio::test]
    async fn explicit_reason_is_recorded_on_cascaded_sessions() {
        let (schedules, sessions, id) = seeded();
        sessions.insert(session_on(id, 2));

        let handler = CancelScheduleHandler::new(schedules, sessions.clone());
        handler
            .handle(CancelScheduleCommand {
                schedule_id: id,
                reason: Some("Term break".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(
            sessions.all()[0].cancellation_reason(),
            Some("Term break")
        );
    }

    #[tokio::test]
    async fn unknown_schedule_yields_not_found() {
        let schedules = Arc::new(InMemoryScheduleRepo::new());
        let sessions = Arc::new(InMemorySessionRepo::new());
        let handler = CancelScheduleHandler::new(schedules, sessions);

        let result = handler
            .handle(CancelScheduleCommand {
                schedule_id: ScheduleId::new(),
                reason: None,
            })
            .await;

        assert!(matches!(result, Err(ScheduleError::NotFound(_))));
    }
}
