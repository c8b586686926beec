//! HTTP handlers for schedule endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::AuthUser;
use crate::application::handlers::schedule::{
    ApproveScheduleCommand, ApproveScheduleHandler, CancelScheduleCommand,
    CancelScheduleHandler, CreateScheduleCommand, CreateScheduleHandler, ProposeSessionCommand,
    ProposeSessionHandler,
};
use crate::domain::foundation::{Role, ScheduleId};
use crate::domain::schedule::{CreatedBy, ScheduleError};

use super::dto::{
    CancelScheduleRequest, CancelScheduleResponse, CreateScheduleRequest, ScheduleResponse,
};

/// Handler state for schedule endpoints.
#[derive(Clone)]
pub struct ScheduleHandlers {
    pub create: Arc<CreateScheduleHandler>,
    pub propose: Arc<ProposeSessionHandler>,
    pub approve: Arc<ApproveScheduleHandler>,
    pub cancel: Arc<CancelScheduleHandler>,
}

/// POST /api/schedules - create a schedule (admin only)
pub async fn create_schedule(
    State(handlers): State<ScheduleHandlers>,
    user: AuthUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Response {
    if user.role != Role::Admin {
        return forbidden("Only admins can create schedules");
    }

    let draft = match req.into_draft() {
        Ok(draft) => draft,
        Err(message) => return bad_request(message),
    };

    let cmd = CreateScheduleCommand {
        draft,
        created_by: CreatedBy::Admin,
    };
    match handlers.create.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ScheduleResponse::from_schedule(
                &result.schedule,
                Some(result.session_count),
            )),
        )
            .into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/schedules/propose - teacher proposes a one-off session
pub async fn propose_session(
    State(handlers): State<ScheduleHandlers>,
    user: AuthUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Response {
    let draft = match req.into_draft() {
        Ok(draft) => draft,
        Err(message) => return bad_request(message),
    };

    let cmd = ProposeSessionCommand {
        actor_id: user.id,
        actor_role: user.role,
        draft,
    };
    match handlers.propose.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ScheduleResponse::from_schedule(&result.schedule, Some(1))),
        )
            .into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/schedules/:id/approve - approve a pending schedule (admin only)
pub async fn approve_schedule(
    State(handlers): State<ScheduleHandlers>,
    user: AuthUser,
    Path(schedule_id): Path<String>,
) -> Response {
    if user.role != Role::Admin {
        return forbidden("Only admins can approve schedules");
    }
    let schedule_id = match parse_schedule_id(&schedule_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .approve
        .handle(ApproveScheduleCommand { schedule_id })
        .await
    {
        Ok(schedule) => (
            StatusCode::OK,
            Json(ScheduleResponse::from_schedule(&schedule, None)),
        )
            .into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

/// POST /api/schedules/:id/cancel - cancel a schedule (admin only)
pub async fn cancel_schedule(
    State(handlers): State<ScheduleHandlers>,
    user: AuthUser,
    Path(schedule_id): Path<String>,
    Json(req): Json<CancelScheduleRequest>,
) -> Response {
    if user.role != Role::Admin {
        return forbidden("Only admins can cancel schedules");
    }
    let schedule_id = match parse_schedule_id(&schedule_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelScheduleCommand {
        schedule_id,
        reason: req.reason,
    };
    match handlers.cancel.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(CancelScheduleResponse {
                id: result.schedule.id().to_string(),
                status: result.schedule.status().as_str().to_string(),
                cancelled_sessions: result.cancelled_sessions,
            }),
        )
            .into_response(),
        Err(e) => handle_schedule_error(e),
    }
}

fn parse_schedule_id(raw: &str) -> Result<ScheduleId, Response> {
    raw.parse::<ScheduleId>()
        .map_err(|_| bad_request("Invalid schedule ID"))
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(message)),
    )
        .into_response()
}

fn forbidden(message: impl Into<String>) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::forbidden(message)),
    )
        .into_response()
}

fn handle_schedule_error(error: ScheduleError) -> Response {
    match error {
        ScheduleError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Schedule", &id.to_string())),
        )
            .into_response(),
        ScheduleError::Forbidden(message) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(message)),
        )
            .into_response(),
        ScheduleError::InvalidState(message) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        ScheduleError::ValidationFailed { message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        ScheduleError::Infrastructure(message) => {
            tracing::error!(error = %message, "schedule endpoint failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
