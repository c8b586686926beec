//! Foundation types shared by every domain module.

mod errors;
mod ids;
mod role;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CourseId, EnrollmentId, ScheduleId, SessionId, UserId};
pub use role::Role;
