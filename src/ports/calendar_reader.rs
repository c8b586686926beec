//! Calendar reader port (read side).
//!
//! The calendar projection reads denormalised session rows that already
//! carry the parent schedule's status and link plus display names, so the
//! aggregator itself never issues follow-up queries.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::schedule::ScheduleStatus;
use crate::domain::session::{LiveStatus, SessionStatus};

/// Which sessions a calendar query may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScope {
    /// Every session in range (admin).
    All,
    /// Sessions taught by this teacher.
    Teacher(UserId),
    /// Sessions assigned to any of these students (student: self;
    /// parent: their children).
    Students(Vec<UserId>),
}

/// Optional inclusive date bounds for a calendar query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether a date falls inside the (possibly open) range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// One denormalised session row for calendar presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCalendarRow {
    pub session_id: SessionId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: SessionStatus,
    pub live_status: LiveStatus,
    pub room_id: Option<String>,
    /// Session-level link override, if any.
    pub meeting_link: Option<String>,
    /// Parent schedule status; `None` for standalone sessions.
    pub schedule_status: Option<ScheduleStatus>,
    /// Parent schedule's default link.
    pub schedule_meeting_link: Option<String>,
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
}

impl SessionCalendarRow {
    /// Session override falls back to the parent schedule's link.
    pub fn effective_meeting_link(&self) -> Option<&str> {
        self.meeting_link
            .as_deref()
            .or(self.schedule_meeting_link.as_deref())
    }
}

/// Read-only projection source for calendar session rows.
#[async_trait]
pub trait CalendarReader: Send + Sync {
    /// Fetch session rows visible to the scope within the range,
    /// ordered by date then start time.
    async fn session_rows(
        &self,
        scope: &SessionScope,
        range: &DateRange,
    ) -> Result<Vec<SessionCalendarRow>, DomainError>;
}
