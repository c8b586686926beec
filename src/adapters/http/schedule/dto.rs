//! HTTP DTOs for schedule endpoints.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseId, EnrollmentId, UserId};
use crate::domain::schedule::{RecurrenceType, ScheduleDefinition, ScheduleDraft};

/// Request to create (or propose) a schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub title: String,
    pub recurrence: RecurrenceType,
    /// Weekday indices, 0 = Sunday through 6 = Saturday.
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub meeting_link: Option<String>,
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub student_id: Option<UserId>,
    pub enrollment_id: Option<EnrollmentId>,
}

impl CreateScheduleRequest {
    /// Convert to a domain draft. Index and time format errors surface as
    /// messages suitable for a 400 response.
    pub fn into_draft(self) -> Result<ScheduleDraft, String> {
        let days_of_week = self
            .days_of_week
            .into_iter()
            .map(weekday_from_index)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScheduleDraft {
            title: self.title,
            recurrence: self.recurrence,
            days_of_week,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
            start_date: self.start_date,
            end_date: self.end_date,
            meeting_link: self.meeting_link,
            course_id: self.course_id,
            teacher_id: self.teacher_id,
            student_id: self.student_id,
            enrollment_id: self.enrollment_id,
        })
    }
}

/// Request to cancel a schedule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelScheduleRequest {
    pub reason: Option<String>,
}

/// Response for schedule command operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: String,
    pub title: String,
    pub recurrence: RecurrenceType,
    pub days_of_week: Vec<u8>,
    pub start_time: String,
    pub end_time: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_count: Option<usize>,
}

impl ScheduleResponse {
    pub fn from_schedule(schedule: &ScheduleDefinition, session_count: Option<usize>) -> Self {
        Self {
            id: schedule.id().to_string(),
            title: schedule.title().to_string(),
            recurrence: schedule.recurrence(),
            days_of_week: schedule
                .days_of_week()
                .iter()
                .map(|d| d.num_days_from_sunday() as u8)
                .collect(),
            start_time: schedule.start_time().format("%H:%M").to_string(),
            end_time: schedule.end_time().format("%H:%M").to_string(),
            start_date: schedule.start_date(),
            end_date: schedule.end_date(),
            status: schedule.status().as_str().to_string(),
            session_count,
        }
    }
}

/// Response for schedule cancellation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelScheduleResponse {
    pub id: String,
    pub status: String,
    pub cancelled_sessions: usize,
}

fn weekday_from_index(index: u8) -> Result<Weekday, String> {
    Ok(match index {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        other => return Err(format!("Invalid weekday index: {}", other)),
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| format!("Invalid time: {}", value))
}
