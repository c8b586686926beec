//! HTTP DTOs for the calendar endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::calendar::{CalendarEvent, EventKind};

/// Query parameters for the calendar feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// One calendar entry as rendered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDto {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub is_live: bool,
}

impl From<CalendarEvent> for CalendarEventDto {
    fn from(event: CalendarEvent) -> Self {
        Self {
            id: event.id,
            title: event.title,
            kind: event.kind,
            start: event.start,
            end: event.end,
            all_day: event.all_day,
            color: event.color.hex().to_string(),
            room_id: event.room_id,
            meeting_link: event.meeting_link,
            course_name: event.course_name,
            teacher_name: event.teacher_name,
            student_name: event.student_name,
            is_live: event.is_live,
        }
    }
}

/// Response wrapper for the calendar feed.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarResponse {
    pub events: Vec<CalendarEventDto>,
}
