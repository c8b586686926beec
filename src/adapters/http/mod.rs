//! HTTP adapters - REST API surface.
//!
//! Each module exposes its own router; `middleware` supplies the identity
//! extractor shared by all of them.

pub mod calendar;
pub mod error;
pub mod middleware;
pub mod schedule;
pub mod session;

pub use calendar::{calendar_routes, CalendarHandlers};
pub use error::ErrorResponse;
pub use schedule::{schedule_routes, ScheduleHandlers};
pub use session::{session_routes, SessionHandlers};
