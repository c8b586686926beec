//! HTTP routes for session endpoints.

use axum::{
    routing::{patch, post},
    Router,
};

use super::handlers::{
    cancel_session, end_session, join_session, start_session, update_disposition,
    SessionHandlers,
};

/// Creates the session router, nested under `/api/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/:id/cancel", post(cancel_session))
        .route("/:id/start", post(start_session))
        .route("/:id/end", post(end_session))
        .route("/:id/join", post(join_session))
        .route("/:id/disposition", patch(update_disposition))
        .with_state(handlers)
}
