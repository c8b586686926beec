//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::AuthUser;
use crate::application::handlers::session::{
    CancelSessionCommand, CancelSessionHandler, EndSessionCommand, EndSessionHandler,
    JoinSessionCommand, JoinSessionHandler, StartSessionCommand, StartSessionHandler,
    UpdateDispositionCommand, UpdateDispositionHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionError, SessionStatus};

use super::dto::{
    CancelSessionRequest, JoinSessionResponse, LiveTransitionResponse, SessionResponse,
    UpdateDispositionRequest,
};

/// Handler state for session endpoints.
#[derive(Clone)]
pub struct SessionHandlers {
    pub cancel: Arc<CancelSessionHandler>,
    pub start: Arc<StartSessionHandler>,
    pub end: Arc<EndSessionHandler>,
    pub join: Arc<JoinSessionHandler>,
    pub disposition: Arc<UpdateDispositionHandler>,
}

/// POST /api/sessions/:id/cancel - cancel one occurrence
pub async fn cancel_session(
    State(handlers): State<SessionHandlers>,
    user: AuthUser,
    Path(session_id): Path<String>,
    Json(req): Json<CancelSessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelSessionCommand {
        session_id,
        actor_id: user.id,
        actor_role: user.role,
        reason: req.reason,
    };
    match handlers.cancel.handle(cmd).await {
        Ok(session) => {
            (StatusCode::OK, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/start - go live
pub async fn start_session(
    State(handlers): State<SessionHandlers>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = StartSessionCommand {
        session_id,
        actor_id: user.id,
        actor_role: user.role,
    };
    match handlers.start.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(LiveTransitionResponse {
                session: SessionResponse::from(&result.session),
                already_live: result.already_live.then_some(true),
                already_ended: None,
            }),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/end - end the live phase
pub async fn end_session(
    State(handlers): State<SessionHandlers>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = EndSessionCommand {
        session_id,
        actor_id: user.id,
        actor_role: user.role,
    };
    match handlers.end.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(LiveTransitionResponse {
                session: SessionResponse::from(&result.session),
                already_live: None,
                already_ended: result.already_ended.then_some(true),
            }),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/sessions/:id/join - mint a join URL
pub async fn join_session(
    State(handlers): State<SessionHandlers>,
    user: AuthUser,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = JoinSessionCommand {
        session_id,
        actor_id: user.id,
        actor_role: user.role,
    };
    match handlers.join.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(JoinSessionResponse {
                join_url: result.join_url,
                room_id: result.room_id,
                display_name: result.display_name,
                is_presenter: result.is_presenter,
            }),
        )
            .into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// PATCH /api/sessions/:id/disposition - record completed/makeup
pub async fn update_disposition(
    State(handlers): State<SessionHandlers>,
    user: AuthUser,
    Path(session_id): Path<String>,
    Json(req): Json<UpdateDispositionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let disposition: SessionStatus = match req.disposition.parse() {
        Ok(status) => status,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Unknown disposition: {}",
                    req.disposition
                ))),
            )
                .into_response()
        }
    };

    let cmd = UpdateDispositionCommand {
        session_id,
        actor_id: user.id,
        actor_role: user.role,
        disposition,
    };
    match handlers.disposition.handle(cmd).await {
        Ok(session) => {
            (StatusCode::OK, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_session_error(error: SessionError) -> Response {
    let message = error.message();
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        SessionError::Forbidden(_) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(message)),
        )
            .into_response(),
        SessionError::MissingRoomId => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("MISSING_ROOM_ID", message)),
        )
            .into_response(),
        SessionError::ValidationFailed { message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        SessionError::Provisioning(_) | SessionError::Infrastructure(_) => {
            tracing::error!(error = %message, "session endpoint failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
