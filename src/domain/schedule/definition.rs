//! ScheduleDefinition aggregate entity.
//!
//! A schedule definition is the recurring or one-time template describing
//! when a class occurs. Concrete dated occurrences ([`crate::domain::session::ClassSession`])
//! are derived from it by recurrence expansion and live their own lifecycle.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, ScheduleId, UserId,
};

/// Maximum length for a schedule title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// How occurrences of a class repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceType {
    OneTime,
    Weekly,
    Biweekly,
}

impl RecurrenceType {
    pub fn is_recurring(&self) -> bool {
        matches!(self, RecurrenceType::Weekly | RecurrenceType::Biweekly)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::OneTime => "one-time",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Biweekly => "biweekly",
        }
    }
}

/// Administrative status of the whole definition.
///
/// `Pending` = teacher-proposed, awaiting admin approval.
/// `Cancelled` voids the definition and its future occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Pending,
    Active,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Active => "active",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

/// Which kind of actor created the definition. Governs the initial status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    Admin,
    Teacher,
}

impl CreatedBy {
    /// Admin-created schedules start active; teacher proposals start pending.
    pub fn initial_status(&self) -> ScheduleStatus {
        match self {
            CreatedBy::Admin => ScheduleStatus::Active,
            CreatedBy::Teacher => ScheduleStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatedBy::Admin => "admin",
            CreatedBy::Teacher => "teacher",
        }
    }
}

/// Input fields for a new schedule definition, prior to validation.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub title: String,
    pub recurrence: RecurrenceType,
    pub days_of_week: Vec<Weekday>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub meeting_link: Option<String>,
    pub course_id: CourseId,
    pub teacher_id: UserId,
    pub student_id: Option<UserId>,
    pub enrollment_id: Option<EnrollmentId>,
}

/// Schedule definition aggregate.
///
/// # Invariants
///
/// - `start_time < end_time` (a class never spans midnight)
/// - recurring definitions have a non-empty, duplicate-free `days_of_week`
/// - `end_date`, when present, is not before `start_date`
/// - created once, mutated only by approve/cancel, never deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    id: ScheduleId,
    title: String,
    recurrence: RecurrenceType,
    days_of_week: Vec<Weekday>,
    start_time: NaiveTime,
    end_time: NaiveTime,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    meeting_link: Option<String>,
    status: ScheduleStatus,
    created_by: CreatedBy,
    course_id: CourseId,
    teacher_id: UserId,
    student_id: Option<UserId>,
    enrollment_id: Option<EnrollmentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScheduleDefinition {
    /// Validate a draft and create a new definition.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty or too long, the times do
    ///   not describe a forward interval within one day, a recurring type
    ///   lacks `days_of_week`, or `end_date` precedes `start_date`
    pub fn new(
        id: ScheduleId,
        draft: ScheduleDraft,
        created_by: CreatedBy,
    ) -> Result<Self, DomainError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(
                "title",
                format!("Title must be {} characters or less", MAX_TITLE_LENGTH),
            ));
        }
        if draft.start_time >= draft.end_time {
            return Err(DomainError::validation(
                "end_time",
                "Class must end after it starts; midnight-spanning shifts are not supported",
            ));
        }
        if let Some(end_date) = draft.end_date {
            if end_date < draft.start_date {
                return Err(DomainError::validation(
                    "end_date",
                    "End date cannot precede start date",
                ));
            }
        }

        let mut days_of_week: Vec<Weekday> = Vec::with_capacity(draft.days_of_week.len());
        for day in draft.days_of_week {
            if !days_of_week.contains(&day) {
                days_of_week.push(day);
            }
        }
        if draft.recurrence.is_recurring() && days_of_week.is_empty() {
            return Err(DomainError::validation(
                "days_of_week",
                "Recurring schedules require at least one weekday",
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id,
            title,
            recurrence: draft.recurrence,
            days_of_week,
            start_time: draft.start_time,
            end_time: draft.end_time,
            start_date: draft.start_date,
            end_date: draft.end_date,
            meeting_link: draft.meeting_link,
            status: created_by.initial_status(),
            created_by,
            course_id: draft.course_id,
            teacher_id: draft.teacher_id,
            student_id: draft.student_id,
            enrollment_id: draft.enrollment_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a definition from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ScheduleId,
        title: String,
        recurrence: RecurrenceType,
        days_of_week: Vec<Weekday>,
        start_time: NaiveTime,
        end_time: NaiveTime,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        meeting_link: Option<String>,
        status: ScheduleStatus,
        created_by: CreatedBy,
        course_id: CourseId,
        teacher_id: UserId,
        student_id: Option<UserId>,
        enrollment_id: Option<EnrollmentId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            recurrence,
            days_of_week,
            start_time,
            end_time,
            start_date,
            end_date,
            meeting_link,
            status,
            created_by,
            course_id,
            teacher_id,
            student_id,
            enrollment_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn recurrence(&self) -> RecurrenceType {
        self.recurrence
    }

    pub fn days_of_week(&self) -> &[Weekday] {
        &self.days_of_week
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn meeting_link(&self) -> Option<&str> {
        self.meeting_link.as_deref()
    }

    pub fn status(&self) -> ScheduleStatus {
        self.status
    }

    pub fn created_by(&self) -> CreatedBy {
        self.created_by
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn teacher_id(&self) -> &UserId {
        &self.teacher_id
    }

    pub fn student_id(&self) -> Option<&UserId> {
        self.student_id.as_ref()
    }

    pub fn enrollment_id(&self) -> Option<&EnrollmentId> {
        self.enrollment_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The last calendar date the definition covers. Open-ended definitions
    /// are bounded to one year after `start_date` so expansion terminates.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| {
            self.start_date
                .checked_add_months(Months::new(12))
                .unwrap_or(self.start_date)
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Approve a teacher-proposed definition.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the status is `Pending`
    pub fn approve(&mut self) -> Result<(), DomainError> {
        if self.status != ScheduleStatus::Pending {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Only pending schedules can be approved (status: {})", self.status.as_str()),
            ));
        }
        self.status = ScheduleStatus::Active;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Cancel the whole definition. Cascading to its sessions is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already cancelled
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        if self.status == ScheduleStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Schedule is already cancelled",
            ));
        }
        self.status = ScheduleStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn teacher() -> UserId {
        UserId::new("teacher-1").unwrap()
    }

    fn draft(recurrence: RecurrenceType, days: Vec<Weekday>) -> ScheduleDraft {
        ScheduleDraft {
            title: "Algebra II".to_string(),
            recurrence,
            days_of_week: days,
            start_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()),
            meeting_link: None,
            course_id: CourseId::new(),
            teacher_id: teacher(),
            student_id: None,
            enrollment_id: None,
        }
    }

    #[test]
    fn admin_created_schedule_starts_active() {
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        assert_eq!(schedule.status(), ScheduleStatus::Active);
    }

    #[test]
    fn teacher_proposed_schedule_starts_pending() {
        let schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Teacher,
        )
        .unwrap();
        assert_eq!(schedule.status(), ScheduleStatus::Pending);
    }

    #[test]
    fn recurring_schedule_requires_days_of_week() {
        let result = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::Weekly, vec![]),
            CreatedBy::Admin,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_title() {
        let mut d = draft(RecurrenceType::OneTime, vec![]);
        d.title = "   ".to_string();
        assert!(ScheduleDefinition::new(ScheduleId::new(), d, CreatedBy::Admin).is_err());
    }

    #[test]
    fn rejects_midnight_spanning_times() {
        let mut d = draft(RecurrenceType::OneTime, vec![]);
        d.start_time = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
        d.end_time = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
        assert!(ScheduleDefinition::new(ScheduleId::new(), d, CreatedBy::Admin).is_err());
    }

    #[test]
    fn rejects_end_date_before_start_date() {
        let mut d = draft(RecurrenceType::OneTime, vec![]);
        d.end_date = Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(ScheduleDefinition::new(ScheduleId::new(), d, CreatedBy::Admin).is_err());
    }

    #[test]
    fn effective_end_defaults_to_one_year_after_start() {
        let mut d = draft(RecurrenceType::Weekly, vec![Weekday::Mon]);
        d.end_date = None;
        let schedule = ScheduleDefinition::new(ScheduleId::new(), d, CreatedBy::Admin).unwrap();
        assert_eq!(
            schedule.effective_end_date(),
            NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()
        );
    }

    #[test]
    fn approve_transitions_pending_to_active() {
        let mut schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Teacher,
        )
        .unwrap();
        schedule.approve().unwrap();
        assert_eq!(schedule.status(), ScheduleStatus::Active);
    }

    #[test]
    fn approve_fails_when_already_active() {
        let mut schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        assert!(schedule.approve().is_err());
    }

    #[test]
    fn cancel_twice_fails() {
        let mut schedule = ScheduleDefinition::new(
            ScheduleId::new(),
            draft(RecurrenceType::OneTime, vec![]),
            CreatedBy::Admin,
        )
        .unwrap();
        schedule.cancel().unwrap();
        assert!(schedule.cancel().is_err());
    }
}
