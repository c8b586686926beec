//! HTTP routes for schedule endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    approve_schedule, cancel_schedule, create_schedule, propose_session, ScheduleHandlers,
};

/// Creates the schedule router, nested under `/api/schedules`.
pub fn schedule_routes(handlers: ScheduleHandlers) -> Router {
    Router::new()
        .route("/", post(create_schedule))
        .route("/propose", post(propose_session))
        .route("/:id/approve", post(approve_schedule))
        .route("/:id/cancel", post(cancel_schedule))
        .with_state(handlers)
}
