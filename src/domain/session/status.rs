//! The two independent state axes of a class session.
//!
//! `SessionStatus` is the administrative disposition of the occurrence;
//! `LiveStatus` is the ephemeral state of the live meeting. Transitions on
//! one axis never implicitly mutate the other: cancelling a schedule changes
//! `SessionStatus`, never the `LiveStatus` of a session that already ended.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Administrative disposition of a session occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
    Makeup,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Makeup => "makeup",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "makeup" => Ok(SessionStatus::Makeup),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}

/// Ephemeral live-meeting state, independent of the administrative axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    Idle,
    Live,
    Ended,
}

impl LiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveStatus::Idle => "idle",
            LiveStatus::Live => "live",
            LiveStatus::Ended => "ended",
        }
    }
}

impl FromStr for LiveStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(LiveStatus::Idle),
            "live" => Ok(LiveStatus::Live),
            "ended" => Ok(LiveStatus::Ended),
            other => Err(ValidationError::invalid_format(
                "live_status",
                format!("unknown live status '{}'", other),
            )),
        }
    }
}
