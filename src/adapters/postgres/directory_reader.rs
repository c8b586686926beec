//! PostgreSQL implementation of DirectoryReader.
//!
//! The engine does not own user or course records; this adapter reads the
//! shared platform tables.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{CourseId, DomainError, ErrorCode, Role, UserId};
use crate::ports::DirectoryReader;

/// PostgreSQL implementation of DirectoryReader.
#[derive(Clone)]
pub struct PostgresDirectoryReader {
    pool: PgPool,
}

impl PostgresDirectoryReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryReader for PostgresDirectoryReader {
    async fn display_name(
        &self,
        role: Role,
        user_id: &UserId,
    ) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT name FROM users WHERE id = $1 AND role = $2")
            .bind(user_id.as_str())
            .bind(role.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch display name: {}", e),
                )
            })?;

        Ok(row.map(|r| r.get("name")))
    }

    async fn course_name(&self, course_id: &CourseId) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT name FROM courses WHERE id = $1")
            .bind(course_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch course name: {}", e),
                )
            })?;

        Ok(row.map(|r| r.get("name")))
    }

    async fn children_of(&self, parent_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        let rows = sqlx::query("SELECT student_id FROM parent_students WHERE parent_id = $1")
            .bind(parent_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch linked students: {}", e),
                )
            })?;

        rows.into_iter()
            .map(|r| UserId::new(r.get::<String, _>("student_id")).map_err(DomainError::from))
            .collect()
    }
}
