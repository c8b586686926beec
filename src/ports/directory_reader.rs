//! User and course directory port.
//!
//! Identity storage is external; the engine only ever needs display names,
//! course names, and parent→children resolution.

use async_trait::async_trait;

use crate::domain::foundation::{CourseId, DomainError, Role, UserId};

/// Read-only access to the external identity/course store.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    /// Full display name for a user, if known.
    async fn display_name(
        &self,
        role: Role,
        user_id: &UserId,
    ) -> Result<Option<String>, DomainError>;

    /// Display name of a course, if known.
    async fn course_name(&self, course_id: &CourseId) -> Result<Option<String>, DomainError>;

    /// Student ids of a parent's children. Empty when none.
    async fn children_of(&self, parent_id: &UserId) -> Result<Vec<UserId>, DomainError>;
}
