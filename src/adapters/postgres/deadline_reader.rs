//! PostgreSQL implementation of DeadlineReader.
//!
//! Quizzes are keyed by creation date; assignments by due date, and rows
//! without a due date never surface on the calendar.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{DeadlineItem, DeadlineReader, DeadlineScope};

/// PostgreSQL implementation of DeadlineReader.
#[derive(Clone)]
pub struct PostgresDeadlineReader {
    pool: PgPool,
}

impl PostgresDeadlineReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeadlineReader for PostgresDeadlineReader {
    async fn active_quizzes(
        &self,
        scope: &DeadlineScope,
    ) -> Result<Vec<DeadlineItem>, DomainError> {
        let base = r#"
            SELECT q.id, q.title, c.name AS course_name, q.created_at AS date
            FROM quizzes q
            LEFT JOIN courses c ON c.id = q.course_id
            WHERE q.is_active
        "#;
        self.fetch_items(base, "q", scope, "quizzes").await
    }

    async fn active_assignments(
        &self,
        scope: &DeadlineScope,
    ) -> Result<Vec<DeadlineItem>, DomainError> {
        let base = r#"
            SELECT a.id, a.title, c.name AS course_name, a.due_date AS date
            FROM assignments a
            LEFT JOIN courses c ON c.id = a.course_id
            WHERE a.is_active AND a.due_date IS NOT NULL
        "#;
        self.fetch_items(base, "a", scope, "assignments").await
    }
}

impl PostgresDeadlineReader {
    async fn fetch_items(
        &self,
        base: &str,
        alias: &str,
        scope: &DeadlineScope,
        what: &str,
    ) -> Result<Vec<DeadlineItem>, DomainError> {
        let mut sql = base.to_string();
        match scope {
            DeadlineScope::Student(_) => {
                sql.push_str(&format!(
                    " AND {a}.course_id IN (SELECT course_id FROM enrollments WHERE student_id = $1)",
                    a = alias
                ));
                sql.push_str(" ORDER BY date");
            }
            DeadlineScope::Teacher(_) => {
                sql.push_str(&format!(" AND {a}.teacher_id = $1", a = alias));
                sql.push_str(" ORDER BY date");
            }
            DeadlineScope::All { .. } => {
                sql.push_str(" ORDER BY date DESC LIMIT $1");
            }
        }

        let query = match scope {
            DeadlineScope::Student(id) | DeadlineScope::Teacher(id) => {
                sqlx::query(&sql).bind(id.as_str().to_string())
            }
            DeadlineScope::All { cap } => sqlx::query(&sql).bind(*cap as i64),
        };

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch {}: {}", what, e),
            )
        })?;

        Ok(rows
            .into_iter()
            .map(|row| DeadlineItem {
                id: row.get::<uuid::Uuid, _>("id").to_string(),
                title: row.get("title"),
                course_name: row.get("course_name"),
                date: row.get("date"),
            })
            .collect())
    }
}
