//! HTTP handler for the calendar feed.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::AuthUser;
use crate::application::handlers::calendar::{GetCalendarEventsHandler, GetCalendarEventsQuery};
use crate::domain::foundation::ErrorCode;
use crate::ports::DateRange;

use super::dto::{CalendarQuery, CalendarResponse};

/// Handler state for the calendar endpoint.
#[derive(Clone)]
pub struct CalendarHandlers {
    pub get_events: Arc<GetCalendarEventsHandler>,
}

/// GET /api/calendar/events - the caller's merged calendar
pub async fn get_events(
    State(handlers): State<CalendarHandlers>,
    user: AuthUser,
    Query(params): Query<CalendarQuery>,
) -> Response {
    if let (Some(start), Some(end)) = (params.start_date, params.end_date) {
        if end < start {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(
                    "endDate cannot precede startDate",
                )),
            )
                .into_response();
        }
    }

    let query = GetCalendarEventsQuery {
        actor_id: user.id,
        actor_role: user.role,
        range: DateRange::new(params.start_date, params.end_date),
    };

    match handlers.get_events.handle(query).await {
        Ok(events) => (
            StatusCode::OK,
            Json(CalendarResponse {
                events: events.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) if e.code == ErrorCode::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(e.message)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "calendar endpoint failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
