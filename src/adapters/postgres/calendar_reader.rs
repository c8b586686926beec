//! PostgreSQL implementation of CalendarReader.
//!
//! Fetches sessions joined with their parent schedule and the user/course
//! directory so the calendar aggregator receives fully denormalised rows.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::schedule::ScheduleStatus;
use crate::domain::session::{LiveStatus, SessionStatus};
use crate::ports::{CalendarReader, DateRange, SessionCalendarRow, SessionScope};

/// PostgreSQL implementation of CalendarReader.
#[derive(Clone)]
pub struct PostgresCalendarReader {
    pool: PgPool,
}

impl PostgresCalendarReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarReader for PostgresCalendarReader {
    async fn session_rows(
        &self,
        scope: &SessionScope,
        range: &DateRange,
    ) -> Result<Vec<SessionCalendarRow>, DomainError> {
        // Scope and range become WHERE clauses; empty student lists cannot
        // reach here (the handler rejects parents without children).
        let mut sql = String::from(
            r#"
            SELECT cs.id, cs.title, cs.date, cs.start_time, cs.end_time,
                   cs.status, cs.live_status, cs.room_id, cs.meeting_link,
                   s.status AS schedule_status,
                   s.meeting_link AS schedule_meeting_link,
                   c.name AS course_name,
                   t.name AS teacher_name,
                   st.name AS student_name
            FROM class_sessions cs
            LEFT JOIN schedules s ON s.id = cs.schedule_id
            LEFT JOIN courses c ON c.id = cs.course_id
            LEFT JOIN users t ON t.id = cs.teacher_id
            LEFT JOIN users st ON st.id = cs.student_id
            WHERE 1 = 1
            "#,
        );

        let mut arg_index = 0u8;
        let mut next = || {
            arg_index += 1;
            format!("${}", arg_index)
        };

        match scope {
            SessionScope::All => {}
            SessionScope::Teacher(_) => {
                sql.push_str(&format!(" AND cs.teacher_id = {}", next()));
            }
            SessionScope::Students(_) => {
                sql.push_str(&format!(" AND cs.student_id = ANY({})", next()));
            }
        }
        if range.start.is_some() {
            sql.push_str(&format!(" AND cs.date >= {}", next()));
        }
        if range.end.is_some() {
            sql.push_str(&format!(" AND cs.date <= {}", next()));
        }
        sql.push_str(" ORDER BY cs.date, cs.start_time");

        let mut query = sqlx::query(&sql);
        match scope {
            SessionScope::All => {}
            SessionScope::Teacher(id) => {
                query = query.bind(id.as_str().to_string());
            }
            SessionScope::Students(ids) => {
                let ids: Vec<String> = ids.iter().map(|i| i.as_str().to_string()).collect();
                query = query.bind(ids);
            }
        }
        if let Some(start) = range.start {
            query = query.bind(start);
        }
        if let Some(end) = range.end {
            query = query.bind(end);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch calendar rows: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_calendar_row).collect()
    }
}

fn row_to_calendar_row(row: sqlx::postgres::PgRow) -> Result<SessionCalendarRow, DomainError> {
    let status: SessionStatus = row
        .get::<String, _>("status")
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;
    let live_status: LiveStatus = row
        .get::<String, _>("live_status")
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;

    let schedule_status = match row.get::<Option<String>, _>("schedule_status") {
        Some(value) => Some(schedule_status_from_str(&value)?),
        None => None,
    };

    Ok(SessionCalendarRow {
        session_id: SessionId::from_uuid(row.get("id")),
        title: row.get("title"),
        date: row.get("date"),
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        status,
        live_status,
        room_id: row.get("room_id"),
        meeting_link: row.get("meeting_link"),
        schedule_status,
        schedule_meeting_link: row.get("schedule_meeting_link"),
        course_name: row.get("course_name"),
        teacher_name: row.get("teacher_name"),
        student_name: row.get("student_name"),
    })
}

fn schedule_status_from_str(value: &str) -> Result<ScheduleStatus, DomainError> {
    match value {
        "pending" => Ok(ScheduleStatus::Pending),
        "active" => Ok(ScheduleStatus::Active),
        "cancelled" => Ok(ScheduleStatus::Cancelled),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid schedule status in database: {}", other),
        )),
    }
}
