//! Class session occurrences and their dual-axis lifecycle.

mod class_session;
mod errors;
mod status;

pub use class_session::{derive_room_id, ClassSession, DEFAULT_CANCEL_REASON};
pub use errors::SessionError;
pub use status::{LiveStatus, SessionStatus};
