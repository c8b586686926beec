//! HTTP routes for the calendar endpoint.

use axum::{routing::get, Router};

use super::handlers::{get_events, CalendarHandlers};

/// Creates the calendar router, nested under `/api/calendar`.
pub fn calendar_routes(handlers: CalendarHandlers) -> Router {
    Router::new()
        .route("/events", get(get_events))
        .with_state(handlers)
}
