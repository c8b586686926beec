//! Calendar event value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventColor;

/// What kind of entity an event projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Class,
    Quiz,
    Assignment,
}

/// One entry in a user's merged calendar.
///
/// Class events span `start..end` on the session's date; quiz and assignment
/// events are all-day points in time keyed by creation or due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub color: EventColor,
    pub room_id: Option<String>,
    pub meeting_link: Option<String>,
    pub course_name: Option<String>,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
    pub is_live: bool,
}

impl CalendarEvent {
    /// Sort events ascending by start time (stable for equal starts).
    pub fn sort_ascending(events: &mut [CalendarEvent]) {
        events.sort_by_key(|e| e.start);
    }
}
