//! In-memory port implementations shared by handler unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::domain::foundation::{
    CourseId, DomainError, ErrorCode, Role, ScheduleId, SessionId, UserId,
};
use crate::domain::schedule::{RecurrenceType, ScheduleDefinition, ScheduleDraft};
use crate::domain::session::ClassSession;
use crate::ports::{
    CalendarReader, DateRange, DeadlineItem, DeadlineReader, DeadlineScope, DirectoryReader,
    RealtimeNotifier, RoomProvisioningClient, ScheduleRepository, SessionCalendarRow,
    SessionRepository, SessionScope,
};

pub fn teacher_id() -> UserId {
    UserId::new("teacher-1").unwrap()
}

pub fn student_id() -> UserId {
    UserId::new("student-1").unwrap()
}

pub fn admin_id() -> UserId {
    UserId::new("admin-1").unwrap()
}

pub fn sample_draft(recurrence: RecurrenceType, days: Vec<Weekday>) -> ScheduleDraft {
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
        teacher_id: teacher_id(),
        student_id: Some(student_id()),
        enrollment_id: None,
    }
}

/// In-memory ScheduleRepository.
#[derive(Default)]
pub struct InMemoryScheduleRepo {
    schedules: Mutex<HashMap<ScheduleId, ScheduleDefinition>>,
    pub fail_save: bool,
}

impl InMemoryScheduleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            schedules: Mutex::new(HashMap::new()),
            fail_save: true,
        }
    }

    pub fn get(&self, id: &ScheduleId) -> Option<ScheduleDefinition> {
        self.schedules.lock().unwrap().get(id).cloned()
    }

    pub fn insert(&self, schedule: ScheduleDefinition) {
        self.schedules
            .lock()
            .unwrap()
            .insert(*schedule.id(), schedule);
    }

    pub fn count(&self) -> usize {
        self.schedules.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepo {
    async fn save(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ));
        }
        self.insert(schedule.clone());
        Ok(())
    }

    async fn update(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError> {
        let mut schedules = self.schedules.lock().unwrap();
        if !schedules.contains_key(schedule.id()) {
            return Err(DomainError::new(
                ErrorCode::ScheduleNotFound,
                format!("Schedule not found: {}", schedule.id()),
            ));
        }
        schedules.insert(*schedule.id(), schedule.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ScheduleId,
    ) -> Result<Option<ScheduleDefinition>, DomainError> {
        Ok(self.get(id))
    }
}

/// In-memory SessionRepository.
#[derive(Default)]
pub struct InMemorySessionRepo {
    sessions: Mutex<HashMap<SessionId, ClassSession>>,
    pub fail_save: bool,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            fail_save: true,
        }
    }

    pub fn get(&self, id: &SessionId) -> Option<ClassSession> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    pub fn insert(&self, session: ClassSession) {
        self.sessions.lock().unwrap().insert(*session.id(), session);
    }

    pub fn all(&self) -> Vec<ClassSession> {
        let mut sessions: Vec<ClassSession> =
            self.sessions.lock().unwrap().values().cloned().collect();
        sessions.sort_by_key(|s| s.date());
        sessions
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepo {
    async fn save_all(&self, sessions: &[ClassSession]) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ));
        }
        let mut store = self.sessions.lock().unwrap();
        for session in sessions {
            store.insert(*session.id(), session.clone());
        }
        Ok(())
    }

    async fn update(&self, session: &ClassSession) -> Result<(), DomainError> {
        let mut store = self.sessions.lock().unwrap();
        if !store.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        store.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<ClassSession>, DomainError> {
        Ok(self.get(id))
    }

    async fn find_by_schedule(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<ClassSession>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|s| s.schedule_id() == Some(schedule_id))
            .collect())
    }
}

/// Notifier that records published events for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<(String, String, serde_json::Value)>>,
    pub fail_publish: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_publish: true,
        }
    }

    pub fn published(&self) -> Vec<(String, String, serde_json::Value)> {
        self.published.lock().unwrap().clone()
    }

    pub fn events_of_type(&self, event: &str) -> Vec<serde_json::Value> {
        self.published()
            .into_iter()
            .filter(|(_, e, _)| e == event)
            .map(|(_, _, payload)| payload)
            .collect()
    }
}

#[async_trait]
impl RealtimeNotifier for RecordingNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError> {
        if self.fail_publish {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published
            .lock()
            .unwrap()
            .push((channel.to_string(), event.to_string(), payload));
        Ok(())
    }
}

/// Directory stub backed by plain maps.
#[derive(Default)]
pub struct StubDirectory {
    pub names: HashMap<String, String>,
    pub courses: HashMap<CourseId, String>,
    pub children: HashMap<String, Vec<UserId>>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, user: &UserId, name: &str) -> Self {
        self.names.insert(user.as_str().to_string(), name.to_string());
        self
    }

    pub fn with_course(mut self, course: CourseId, name: &str) -> Self {
        self.courses.insert(course, name.to_string());
        self
    }

    pub fn with_children(mut self, parent: &UserId, children: Vec<UserId>) -> Self {
        self.children
            .insert(parent.as_str().to_string(), children);
        self
    }
}

#[async_trait]
impl DirectoryReader for StubDirectory {
    async fn display_name(
        &self,
        _role: Role,
        user_id: &UserId,
    ) -> Result<Option<String>, DomainError> {
        Ok(self.names.get(user_id.as_str()).cloned())
    }

    async fn course_name(&self, course_id: &CourseId) -> Result<Option<String>, DomainError> {
        Ok(self.courses.get(course_id).cloned())
    }

    async fn children_of(&self, parent_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        Ok(self
            .children
            .get(parent_id.as_str())
            .cloned()
            .unwrap_or_default())
    }
}

/// Room client stub that mints predictable join URLs.
#[derive(Default)]
pub struct StubRoomClient {
    pub fail: bool,
}

impl StubRoomClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl RoomProvisioningClient for StubRoomClient {
    async fn create_join_url(
        &self,
        room_id: &str,
        display_name: &str,
        is_presenter: bool,
    ) -> Result<String, DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::ProvisioningError,
                "Simulated provider outage",
            ));
        }
        Ok(format!(
            "https://rooms.example/{}?name={}&presenter={}",
            room_id, display_name, is_presenter
        ))
    }
}

/// Calendar reader over a fixed set of rows, honouring scope and range.
#[derive(Default)]
pub struct StubCalendarReader {
    pub rows: Vec<(SessionCalendarRow, UserId, Option<UserId>)>,
}

impl StubCalendarReader {
    /// `(row, teacher, student)` tuples; scope filtering mimics storage.
    pub fn new(rows: Vec<(SessionCalendarRow, UserId, Option<UserId>)>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl CalendarReader for StubCalendarReader {
    async fn session_rows(
        &self,
        scope: &SessionScope,
        range: &DateRange,
    ) -> Result<Vec<SessionCalendarRow>, DomainError> {
        Ok(self
            .rows
            .iter()
            .filter(|(row, teacher, student)| {
                range.contains(row.date)
                    && match scope {
                        SessionScope::All => true,
                        SessionScope::Teacher(id) => teacher == id,
                        SessionScope::Students(ids) => {
                            student.as_ref().is_some_and(|s| ids.contains(s))
                        }
                    }
            })
            .map(|(row, _, _)| row.clone())
            .collect())
    }
}

/// Deadline reader over fixed quiz/assignment lists.
#[derive(Default)]
pub struct StubDeadlineReader {
    pub quizzes: Vec<DeadlineItem>,
    pub assignments: Vec<DeadlineItem>,
}

#[async_trait]
impl DeadlineReader for StubDeadlineReader {
    async fn active_quizzes(
        &self,
        scope: &DeadlineScope,
    ) -> Result<Vec<DeadlineItem>, DomainError> {
        Ok(capped(&self.quizzes, scope))
    }

    async fn active_assignments(
        &self,
        scope: &DeadlineScope,
    ) -> Result<Vec<DeadlineItem>, DomainError> {
        Ok(capped(&self.assignments, scope))
    }
}

fn capped(items: &[DeadlineItem], scope: &DeadlineScope) -> Vec<DeadlineItem> {
    match scope {
        DeadlineScope::All { cap } => items.iter().take(*cap as usize).cloned().collect(),
        _ => items.to_vec(),
    }
}
