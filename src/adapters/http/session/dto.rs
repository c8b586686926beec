//! HTTP DTOs for session endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::session::ClassSession;

/// Request to cancel a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelSessionRequest {
    pub reason: Option<String>,
}

/// Request to record a session's outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDispositionRequest {
    /// `completed` or `makeup`.
    pub disposition: String,
}

/// Session detail returned by command endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
    pub live_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}

impl From<&ClassSession> for SessionResponse {
    fn from(session: &ClassSession) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            date: session.date(),
            start_time: session.start_time().format("%H:%M").to_string(),
            end_time: session.end_time().format("%H:%M").to_string(),
            status: session.status().as_str().to_string(),
            live_status: session.live_status().as_str().to_string(),
            cancellation_reason: session.cancellation_reason().map(str::to_string),
            room_id: session.room_id().map(str::to_string),
        }
    }
}

/// Response for start/end, flagging idempotent repeats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTransitionResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_live: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_ended: Option<bool>,
}

/// Response carrying a freshly minted join URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSessionResponse {
    pub join_url: String,
    pub room_id: String,
    pub display_name: String,
    pub is_presenter: bool,
}
