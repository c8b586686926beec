//! Session repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ScheduleId, SessionId};
use crate::domain::session::ClassSession;

/// Repository port for ClassSession persistence.
///
/// Sessions are created in bulk by recurrence expansion; lifecycle fields
/// are mutated one session at a time.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a batch of freshly expanded sessions.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_all(&self, sessions: &[ClassSession]) -> Result<(), DomainError>;

    /// Update an existing session's lifecycle fields.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &ClassSession) -> Result<(), DomainError>;

    /// Find a session by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<ClassSession>, DomainError>;

    /// All sessions belonging to a schedule definition, ordered by date.
    async fn find_by_schedule(
        &self,
        schedule_id: &ScheduleId,
    ) -> Result<Vec<ClassSession>, DomainError>;
}
