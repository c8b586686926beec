//! GetCalendarEventsHandler - merges sessions and deadlines into one feed.

use std::sync::Arc;

use crate::domain::calendar::{CalendarEvent, EventColor, EventKind};
use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::ports::{
    CalendarReader, DateRange, DeadlineItem, DeadlineReader, DeadlineScope, DirectoryReader,
    SessionCalendarRow, SessionScope, ADMIN_DEADLINE_CAP,
};

/// Query for a user's merged calendar.
#[derive(Debug, Clone)]
pub struct GetCalendarEventsQuery {
    pub actor_id: UserId,
    pub actor_role: Role,
    pub range: DateRange,
}

/// Handler assembling the role-scoped calendar feed.
pub struct GetCalendarEventsHandler {
    calendar: Arc<dyn CalendarReader>,
    deadlines: Arc<dyn DeadlineReader>,
    directory: Arc<dyn DirectoryReader>,
}

impl GetCalendarEventsHandler {
    pub fn new(
        calendar: Arc<dyn CalendarReader>,
        deadlines: Arc<dyn DeadlineReader>,
        directory: Arc<dyn DirectoryReader>,
    ) -> Self {
        Self {
            calendar,
            deadlines,
            directory,
        }
    }

    pub async fn handle(
        &self,
        query: GetCalendarEventsQuery,
    ) -> Result<Vec<CalendarEvent>, DomainError> {
        let scope = self.session_scope(&query).await?;
        let rows = self.calendar.session_rows(&scope, &query.range).await?;

        let mut events: Vec<CalendarEvent> = rows.into_iter().map(session_event).collect();

        // Parents see their children's classes only; deadline feeds are
        // surfaced to students, teachers and admins.
        if let Some(deadline_scope) = deadline_scope(&query) {
            let quizzes = self.deadlines.active_quizzes(&deadline_scope).await?;
            events.extend(
                quizzes
                    .into_iter()
                    .map(|item| deadline_event(item, EventKind::Quiz)),
            );

            let assignments = self.deadlines.active_assignments(&deadline_scope).await?;
            events.extend(
                assignments
                    .into_iter()
                    .map(|item| deadline_event(item, EventKind::Assignment)),
            );
        }

        CalendarEvent::sort_ascending(&mut events);
        Ok(events)
    }

    async fn session_scope(
        &self,
        query: &GetCalendarEventsQuery,
    ) -> Result<SessionScope, DomainError> {
        Ok(match query.actor_role {
            Role::Admin => SessionScope::All,
            Role::Teacher => SessionScope::Teacher(query.actor_id.clone()),
            Role::Student => SessionScope::Students(vec![query.actor_id.clone()]),
            Role::Parent => {
                let children = self.directory.children_of(&query.actor_id).await?;
                if children.is_empty() {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "No students are linked to this parent account",
                    ));
                }
                SessionScope::Students(children)
            }
        })
    }
}

fn deadline_scope(query: &GetCalendarEventsQuery) -> Option<DeadlineScope> {
    match query.actor_role {
        Role::Student => Some(DeadlineScope::Student(query.actor_id.clone())),
        Role::Teacher => Some(DeadlineScope::Teacher(query.actor_id.clone())),
        Role::Admin => Some(DeadlineScope::All {
            cap: ADMIN_DEADLINE_CAP,
        }),
        Role::Parent => None,
    }
}

fn session_event(row: SessionCalendarRow) -> CalendarEvent {
    let is_live = row.live_status == crate::domain::session::LiveStatus::Live;
    let color = EventColor::for_session(row.status, row.schedule_status, is_live);
    let meeting_link = row.effective_meeting_link().map(str::to_string);
    CalendarEvent {
        id: row.session_id.to_string(),
        title: row.title,
        kind: EventKind::Class,
        start: row.date.and_time(row.start_time).and_utc(),
        end: row.date.and_time(row.end_time).and_utc(),
        all_day: false,
        color,
        room_id: row.room_id,
        meeting_link,
        course_name: row.course_name,
        teacher_name: row.teacher_name,
        student_name: row.student_name,
        is_live,
    }
}

fn deadline_event(item: DeadlineItem, kind: EventKind) -> CalendarEvent {
    let (prefix, color) = match kind {
        EventKind::Quiz => ("quiz", EventColor::Quiz),
        _ => ("assignment", EventColor::Assignment),
    };
    CalendarEvent {
        id: format!("{}-{}", prefix, item.id),
        title: item.title,
        kind,
        start: item.date,
        end: item.date,
        all_day: true,
        color,
        room_id: None,
        meeting_link: None,
        course_name: item.course_name,
        teacher_name: None,
        student_name: None,
        is_live: false,
    }
}
