//! Schedule definitions and recurrence expansion.

mod definition;
mod errors;
pub mod recurrence;

pub use definition::{
    CreatedBy, RecurrenceType, ScheduleDefinition, ScheduleDraft, ScheduleStatus,
    MAX_TITLE_LENGTH,
};
pub use errors::ScheduleError;
pub use recurrence::{expand, SessionDraft, MAX_SESSIONS_PER_SCHEDULE};
