//! Schedule repository port (write side).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ScheduleId};
use crate::domain::schedule::ScheduleDefinition;

/// Repository port for ScheduleDefinition persistence.
///
/// Definitions are never deleted; cancellation is soft state via `status`.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Save a new schedule definition.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError>;

    /// Update an existing definition (approve/cancel transitions).
    ///
    /// # Errors
    ///
    /// - `ScheduleNotFound` if the definition doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, schedule: &ScheduleDefinition) -> Result<(), DomainError>;

    /// Find a definition by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &ScheduleId)
        -> Result<Option<ScheduleDefinition>, DomainError>;
}
