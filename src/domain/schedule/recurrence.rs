//! Recurrence expansion: schedule definition → dated session drafts.
//!
//! Expansion is pure and deterministic. It walks the calendar one day at a
//! time from the definition's start date through its effective end date and
//! emits a draft for every date whose weekday the definition names.
//!
//! Biweekly definitions keep a per-weekday occurrence counter and emit every
//! other occurrence of each matching weekday, so a Mon/Thu biweekly class
//! alternates weeks even when the start date falls mid-week.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::domain::foundation::{CourseId, EnrollmentId, ScheduleId, UserId};
use crate::domain::schedule::{RecurrenceType, ScheduleDefinition};

/// Runaway-generation guard: one definition never expands to more rows.
pub const MAX_SESSIONS_PER_SCHEDULE: usize = 500;

/// One not-yet-persisted session occurrence produced by expansion.
///
/// Drafts never carry a meeting link; sessions inherit the schedule's link
/// at read time unless explicitly overridden later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub schedule_id: ScheduleId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub student_id: Option<UserId>,
    pub enrollment_id: Option<EnrollmentId>,
}

/// Expand a schedule definition into its ordered list of session drafts.
///
/// Never fails on a valid definition; definitions with an empty weekday set
/// for a recurring type are rejected by validation before expansion runs.
pub fn expand(schedule: &ScheduleDefinition) -> Vec<SessionDraft> {
    match schedule.recurrence() {
        RecurrenceType::OneTime => vec![draft_for(schedule, schedule.start_date())],
        RecurrenceType::Weekly => walk(schedule, 1),
        RecurrenceType::Biweekly => walk(schedule, 2),
    }
}

/// Day-by-day walk emitting every `cadence`-th occurrence of each matching
/// weekday, capped at [`MAX_SESSIONS_PER_SCHEDULE`].
fn walk(schedule: &ScheduleDefinition, cadence: u32) -> Vec<SessionDraft> {
    let end = schedule.effective_end_date();
    let mut occurrences: HashMap<Weekday, u32> = HashMap::new();
    let mut drafts = Vec::new();
    let mut date = schedule.start_date();

    while date <= end && drafts.len() < MAX_SESSIONS_PER_SCHEDULE {
        let weekday = date.weekday();
        if schedule.days_of_week().contains(&weekday) {
            let seen = occurrences.entry(weekday).or_insert(0);
            if *seen % cadence == 0 {
                drafts.push(draft_for(schedule, date));
            }
            *seen += 1;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    drafts
}

fn draft_for(schedule: &ScheduleDefinition, date: NaiveDate) -> SessionDraft {
    SessionDraft {
        schedule_id: *schedule.id(),
        title: schedule.title().to_string(),
        date,
        start_time: schedule.start_time(),
        end_time: schedule.end_time(),
        course_id: *schedule.course_id(),
        teacher_id: schedule.teacher_id().clone(),
        student_id: schedule.student_id().cloned(),
        enrollment_id: schedule.enrollment_id().copied(),
    }
}
