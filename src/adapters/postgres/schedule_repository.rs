//! PostgreSQL implementation of ScheduleRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, ScheduleId, UserId,
};
use crate::domain::schedule::{
    CreatedBy, RecurrenceType, ScheduleDefinition, ScheduleStatus,
};
use crate::ports::ScheduleRepository;

use super::{weekday_from_i16, weekday_to_i16};

/// PostgreSQL implementation of ScheduleRepository.
#[derive(Clone)]
pub struct PostgresScheduleRepository {
    pool: PgPool,
}

impl PostgresScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepository {
    async fn save(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError> {
        let days: Vec<i16> = schedule
            .days_of_week()
            .iter()
            .copied()
            .map(weekday_to_i16)
            .collect();

        sqlx::query(
            r#"
            INSERT INTO schedules (
                id, title, recurrence, days_of_week, start_time, end_time,
                start_date, end_date, meeting_link, status, created_by,
                course_id, teacher_id, student_id, enrollment_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(schedule.id().as_uuid())
        .bind(schedule.title())
        .bind(schedule.recurrence().as_str())
        .bind(&days)
        .bind(schedule.start_time())
        .bind(schedule.end_time())
        .bind(schedule.start_date())
        .bind(schedule.end_date())
        .bind(schedule.meeting_link())
        .bind(schedule.status().as_str())
        .bind(schedule.created_by().as_str())
        .bind(schedule.course_id().as_uuid())
        .bind(schedule.teacher_id().as_str())
        .bind(schedule.student_id().map(|s| s.as_str()))
        .bind(schedule.enrollment_id().map(|e| e.as_uuid()))
        .bind(schedule.created_at())
        .bind(schedule.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert schedule: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE schedules SET
                status = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(schedule.id().as_uuid())
        .bind(schedule.status().as_str())
        .bind(schedule.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update schedule: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ScheduleNotFound,
                format!("Schedule not found: {}", schedule.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ScheduleId,
    ) -> Result<Option<ScheduleDefinition>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, recurrence, days_of_week, start_time, end_time,
                   start_date, end_date, meeting_link, status, created_by,
                   course_id, teacher_id, student_id, enrollment_id,
                   created_at, updated_at
            FROM schedules
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch schedule: {}", e),
            )
        })?;

        match row {
            Some(row) => Ok(Some(row_to_schedule(row)?)),
            None => Ok(None),
        }
    }
}

fn row_to_schedule(row: sqlx::postgres::PgRow) -> Result<ScheduleDefinition, DomainError> {
    let days_raw: Vec<i16> = row.get("days_of_week");
    let days_of_week = days_raw
        .into_iter()
        .map(weekday_from_i16)
        .collect::<Result<Vec<_>, _>>()?;

    let recurrence = recurrence_from_str(row.get("recurrence"))?;
    let status = status_from_str(row.get("status"))?;
    let created_by = created_by_from_str(row.get("created_by"))?;

    let teacher_id = UserId::new(row.get::<String, _>("teacher_id"))?;
    let student_id = row
        .get::<Option<String>, _>("student_id")
        .map(UserId::new)
        .transpose()?;

    Ok(ScheduleDefinition::reconstitute(
        ScheduleId::from_uuid(row.get("id")),
        row.get("title"),
        recurrence,
        days_of_week,
        row.get("start_time"),
        row.get("end_time"),
        row.get("start_date"),
        row.get("end_date"),
        row.get("meeting_link"),
        status,
        created_by,
        CourseId::from_uuid(row.get("course_id")),
        teacher_id,
        student_id,
        row.get::<Option<uuid::Uuid>, _>("enrollment_id")
            .map(EnrollmentId::from_uuid),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}

fn recurrence_from_str(value: &str) -> Result<RecurrenceType, DomainError> {
    match value {
        "one-time" => Ok(RecurrenceType::OneTime),
        "weekly" => Ok(RecurrenceType::Weekly),
        "biweekly" => Ok(RecurrenceType::Biweekly),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid recurrence in database: {}", other),
        )),
    }
}

fn status_from_str(value: &str) -> Result<ScheduleStatus, DomainError> {
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

fn created_by_from_str(value: &str) -> Result<CreatedBy, DomainError> {
    match value {
        "admin" => Ok(CreatedBy::Admin),
        "teacher" => Ok(CreatedBy::Teacher),
        other => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid created_by in database: {}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_mappings_cover_every_variant() {
        for recurrence in [
            RecurrenceType::OneTime,
            RecurrenceType::Weekly,
            RecurrenceType::Biweekly,
        ] {
            assert_eq!(recurrence_from_str(recurrence.as_str()).unwrap(), recurrence);
        }
        for status in [
            ScheduleStatus::Pending,
            ScheduleStatus::Active,
            ScheduleStatus::Cancelled,
        ] {
            assert_eq!(status_from_str(status.as_str()).unwrap(), status);
        }
        for created_by in [CreatedBy::Admin, CreatedBy::Teacher] {
            assert_eq!(
                created_by_from_str(created_by.as_str()).unwrap(),
                created_by
            );
        }
    }

    #[test]
    fn unknown_strings_are_database_errors() {
        assert!(recurrence_from_str("monthly").is_err());
        assert!(status_from_str("archived").is_err());
        assert!(created_by_from_str("student").is_err());
    }
}
