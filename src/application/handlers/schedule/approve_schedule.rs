//! ApproveScheduleHandler - admin approves a teacher-proposed schedule.

use std::sync::Arc;

use crate::domain::foundation::ScheduleId;
use crate::domain::schedule::{ScheduleDefinition, ScheduleError};
use crate::ports::ScheduleRepository;

/// Command to approve a pending schedule.
#[derive(Debug, Clone)]
pub struct ApproveScheduleCommand {
    pub schedule_id: ScheduleId,
}

/// Handler for approving pending schedules.
pub struct ApproveScheduleHandler {
    schedules: Arc<dyn ScheduleRepository>,
}

impl ApproveScheduleHandler {
    pub fn new(schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { schedules }
    }

    pub async fn handle(
        &self,
        cmd: ApproveScheduleCommand,
    ) -> Result<ScheduleDefinition, ScheduleError> {
        let mut schedule = self
            .schedules
            .find_by_id(&cmd.schedule_id)
            .await?
            .ok_or(ScheduleError::NotFound(cmd.schedule_id))?;

        schedule.approve()?;
        self.schedules.update(&schedule).await?;

        tracing::info!(schedule_id = %schedule.id(), "schedule approved");
        Ok(schedule)
    }
}
