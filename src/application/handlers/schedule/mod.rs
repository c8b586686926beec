//! Schedule command handlers.

mod approve_schedule;
mod cancel_schedule;
mod create_schedule;
mod propose_session;

pub use approve_schedule::{ApproveScheduleCommand, ApproveScheduleHandler};
pub use cancel_schedule::{
    CancelScheduleCommand, CancelScheduleHandler, CancelScheduleResult,
    DEFAULT_SCHEDULE_CANCEL_REASON,
};
pub use create_schedule::{CreateScheduleCommand, CreateScheduleHandler, CreateScheduleResult};
pub use propose_session::{ProposeSessionCommand, ProposeSessionHandler, ProposeSessionResult};
