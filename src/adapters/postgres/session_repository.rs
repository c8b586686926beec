//! PostgreSQL implementation of SessionRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, ScheduleId, SessionId, UserId,
};
use crate::domain::session::{ClassSession, LiveStatus, SessionStatus};
use crate::ports::SessionRepository;

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn save_all(&self, sessions: &[ClassSession]) -> Result<(), DomainError> {
        // Expansion inserts up to 500 rows; one transaction keeps a partial
        // schedule from becoming visible.
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        for session in sessions {
            sqlx::query(
                r#"
                INSERT INTO class_sessions (
                    id, schedule_id, title, date, start_time, end_time,
                    meeting_link, status, live_status, cancellation_reason,
                    room_id, course_id, teacher_id, student_id, enrollment_id,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                "#,
            )
            .bind(session.id().as_uuid())
            .bind(session.schedule_id().map(|s| s.as_uuid()))
            .bind(session.title())
            .bind(session.date())
            .bind(session.start_time())
            .bind(session.end_time())
            .bind(session.meeting_link())
            .bind(session.status().as_str())
            .bind(session.live_status().as_str())
            .bind(session.cancellation_reason())
            .bind(session.room_id())
            .bind(session.course_id().as_uuid())
            .bind(session.teacher_id().as_str())
            .bind(session.student_id().map(|s| s.as_str()))
            .bind(session.enrollment_id().map(|e| e.as_uuid()))
            .bind(session.created_at())
            .bind(session.updated_at())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert session: {}", e),
                )
            })?;
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit session insert: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &ClassSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE class_sessions SET
                status = $2,
                live_status = $3,
                cancellation_reason = $4,
                room_id = $5,
                meeting_link = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.status().as_str())
        .bind(session.live_status().as_str())
        .bind(session.cancellation_reason())
        .bind(session.room_id())
        .bind(session.meeting_link())
        .bind(session.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<ClassSession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, schedule_id, title, date, start_time, end_time,
                   meeting_link, status, live_status, cancellation_reason,
                   room_id, course_id, teacher_id, student_id, enrollment_id,
                   created_at, updated_at
            FROM class_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch session: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_session(row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_schedule(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<ClassSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, schedule_id, title, date, start_time, end_time,
                   meeting_link, status, live_status, cancellation_reason,
                   room_id, course_id, teacher_id, student_id, enrollment_id,
                   created_at, updated_at
            FROM class_sessions
            WHERE schedule_id = $1
            ORDER BY date, start_time
            "#,
        )
        .bind(schedule_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions by schedule: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<ClassSession, DomainError> {
    let status: SessionStatus = row
        .get::<String, _>("status")
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;
    let live_status: LiveStatus = row
        .get::<String, _>("live_status")
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;

    let teacher_id = UserId::new(row.get::<String, _>("teacher_id"))?;
    let student_id = row
        .get::<Option<String>, _>("student_id")
        .map(UserId::new)
        .transpose()?;

    Ok(ClassSession::reconstitute(
        SessionId::from_uuid(row.get("id")),
        row.get::<Option<uuid::Uuid>, _>("schedule_id")
            .map(ScheduleId::from_uuid),
        row.get("title"),
        row.get("date"),
        row.get("start_time"),
        row.get("end_time"),
        row.get("meeting_link"),
        status,
        live_status,
        row.get("cancellation_reason"),
        row.get("room_id"),
        CourseId::from_uuid(row.get("course_id")),
        teacher_id,
        student_id,
        row.get::<Option<uuid::Uuid>, _>("enrollment_id")
            .map(EnrollmentId::from_uuid),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
