//! Deadline-event source port (read side).
//!
//! Quizzes and assignments live elsewhere in the system; the calendar only
//! needs their titles and dates. Assignments without a due date are excluded
//! by contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{DomainError, UserId};

/// Cap on deadline items per category for admin-wide queries.
pub const ADMIN_DEADLINE_CAP: u32 = 200;

/// Who the deadline query is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineScope {
    /// Active items visible to this student through their enrollments.
    Student(UserId),
    /// Active items owned by this teacher.
    Teacher(UserId),
    /// Every active item, capped per category.
    All { cap: u32 },
}

/// One deadline-bearing item (quiz or assignment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineItem {
    pub id: String,
    pub title: String,
    pub course_name: Option<String>,
    /// Quiz creation date or assignment due date.
    pub date: DateTime<Utc>,
}

/// Read-only query source for active quizzes and assignments.
#[async_trait]
pub trait DeadlineReader: Send + Sync {
    /// Active quizzes in scope, keyed by creation date.
    async fn active_quizzes(&self, scope: &DeadlineScope)
        -> Result<Vec<DeadlineItem>, DomainError>;

    /// Active assignments in scope, keyed by due date. Implementations must
    /// not return assignments that have no due date.
    async fn active_assignments(
        &self,
        scope: &DeadlineScope,
    ) -> Result<Vec<DeadlineItem>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn DeadlineReader) {}
    }
}
