//! HTTP endpoints for schedule management.

mod dto;
mod handlers;
mod routes;

pub use handlers::ScheduleHandlers;
pub use routes::schedule_routes;
