//! HTTP endpoint for the merged calendar feed.

mod dto;
mod handlers;
mod routes;

pub use handlers::CalendarHandlers;
pub use routes::calendar_routes;
