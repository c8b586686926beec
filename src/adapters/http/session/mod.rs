//! HTTP endpoints for session lifecycle operations.

mod dto;
mod handlers;
mod routes;

pub use handlers::SessionHandlers;
pub use routes::session_routes;
