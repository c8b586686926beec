//! Display colors derived from effective session status.

use serde::{Deserialize, Serialize};

use crate::domain::schedule::ScheduleStatus;
use crate::domain::session::SessionStatus;

/// Color key for a calendar event.
///
/// Session colors follow the effective-status table; quiz and assignment
/// events use two further fixed colors distinct from session colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Scheduled,
    Pending,
    Completed,
    Cancelled,
    Makeup,
    Live,
    Quiz,
    Assignment,
}

impl EventColor {
    /// Effective color for a session, combining its administrative status
    /// with the parent schedule's status and the live flag.
    ///
    /// A live session overrides everything else. A `scheduled` session on a
    /// still-pending schedule shows as pending.
    pub fn for_session(
        status: SessionStatus,
        schedule_status: Option<ScheduleStatus>,
        is_live: bool,
    ) -> Self {
        if is_live {
            return EventColor::Live;
        }
        match status {
            SessionStatus::Completed => EventColor::Completed,
            SessionStatus::Cancelled => EventColor::Cancelled,
            SessionStatus::Makeup => EventColor::Makeup,
            SessionStatus::Scheduled => match schedule_status {
                Some(ScheduleStatus::Pending) => EventColor::Pending,
                _ => EventColor::Scheduled,
            },
        }
    }

    /// Fixed hex value rendered by clients.
    pub fn hex(&self) -> &'static str {
        match self {
            EventColor::Scheduled => "#3788d8",
            EventColor::Pending => "#f59e0b",
            EventColor::Completed => "#10b981",
            EventColor::Cancelled => "#9ca3af",
            EventColor::Makeup => "#8b5cf6",
            EventColor::Live => "#ef4444",
            EventColor::Quiz => "#ec4899",
            EventColor::Assignment => "#14b8a6",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_overrides_every_administrative_status() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
            SessionStatus::Makeup,
        ] {
            assert_eq!(
                EventColor::for_session(status, Some(ScheduleStatus::Active), true),
                EventColor::Live
            );
        }
    }

    #[test]
    fn scheduled_on_pending_schedule_shows_pending() {
        assert_eq!(
            EventColor::for_session(
                SessionStatus::Scheduled,
                Some(ScheduleStatus::Pending),
                false
            ),
            EventColor::Pending
        );
    }

    #[test]
    fn scheduled_on_active_schedule_shows_scheduled() {
        assert_eq!(
            EventColor::for_session(
                SessionStatus::Scheduled,
                Some(ScheduleStatus::Active),
                false
            ),
            EventColor::Scheduled
        );
    }

    #[test]
    fn standalone_scheduled_session_shows_scheduled() {
        assert_eq!(
            EventColor::for_session(SessionStatus::Scheduled, None, false),
            EventColor::Scheduled
        );
    }

    #[test]
    fn terminal_statuses_ignore_schedule_status() {
        for schedule_status in [
            Some(ScheduleStatus::Pending),
            Some(ScheduleStatus::Active),
            Some(ScheduleStatus::Cancelled),
            None,
        ] {
            assert_eq!(
                EventColor::for_session(SessionStatus::Completed, schedule_status, false),
                EventColor::Completed
            );
            assert_eq!(
                EventColor::for_session(SessionStatus::Cancelled, schedule_status, false),
                EventColor::Cancelled
            );
            assert_eq!(
                EventColor::for_session(SessionStatus::Makeup, schedule_status, false),
                EventColor::Makeup
            );
        }
    }

    #[test]
    fn deadline_colors_are_distinct_from_session_colors() {
        let session_colors = [
            EventColor::Scheduled.hex(),
            EventColor::Pending.hex(),
            EventColor::Completed.hex(),
            EventColor::Cancelled.hex(),
            EventColor::Makeup.hex(),
            EventColor::Live.hex(),
        ];
        assert!(!session_colors.contains(&EventColor::Quiz.hex()));
        assert!(!session_colors.contains(&EventColor::Assignment.hex()));
    }
}
