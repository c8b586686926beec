//! ClassSession entity - one concrete, dated occurrence of a class.
//!
//! Sessions are created in bulk by recurrence expansion (or singly for a
//! teacher proposal) and then live on two independent state axes: the
//! administrative [`SessionStatus`] and the ephemeral [`LiveStatus`].
//!
//! # Room ids
//!
//! The room id names a meeting with the external room provider. It is
//! derived deterministically from the session's UUID, so with
//! client-generated ids it is known before the first write and every
//! persisted session carries one.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{
    CourseId, DomainError, EnrollmentId, ErrorCode, Role, ScheduleId, SessionId, UserId,
};
use crate::domain::schedule::SessionDraft;
use crate::domain::session::{LiveStatus, SessionStatus};

/// Reason recorded when a session is cancelled without one being given.
pub const DEFAULT_CANCEL_REASON: &str = "Cancelled";

/// Derive the stable external room id for a session.
pub fn derive_room_id(id: &SessionId) -> String {
    let digest = Sha256::digest(id.as_uuid().as_bytes());
    let mut room = String::from("room-");
    for byte in &digest[..8] {
        let _ = write!(room, "{:02x}", byte);
    }
    room
}

/// One concrete occurrence of a class.
///
/// # Invariants
///
/// - a `Live` session always has a room id
/// - `cancellation_reason` is set only on cancellation
/// - the two state axes are mutated independently, never together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    id: SessionId,
    /// Originating definition; `None` only for standalone one-off sessions.
    schedule_id: Option<ScheduleId>,
    title: String,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    /// Overrides the parent schedule's link when present.
    meeting_link: Option<String>,
    status: SessionStatus,
    live_status: LiveStatus,
    cancellation_reason: Option<String>,
    room_id: Option<String>,
    course_id: CourseId,
    teacher_id: UserId,
    student_id: Option<UserId>,
    enrollment_id: Option<EnrollmentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ClassSession {
    /// Materialise a session from an expansion draft. The room id is
    /// computed up front from the freshly generated id.
    pub fn from_draft(id: SessionId, draft: SessionDraft) -> Self {
        let now = Utc::now();
        Self {
            room_id: Some(derive_room_id(&id)),
            id,
            schedule_id: Some(draft.schedule_id),
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            meeting_link: None,
            status: SessionStatus::Scheduled,
            live_status: LiveStatus::Idle,
            cancellation_reason: None,
            course_id: draft.course_id,
            teacher_id: draft.teacher_id,
            student_id: draft.student_id,
            enrollment_id: draft.enrollment_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        schedule_id: Option<ScheduleId>,
        title: String,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        meeting_link: Option<String>,
        status: SessionStatus,
        live_status: LiveStatus,
        cancellation_reason: Option<String>,
        room_id: Option<String>,
        course_id: CourseId,
        teacher_id: UserId,
        student_id: Option<UserId>,
        enrollment_id: Option<EnrollmentId>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            schedule_id,
            title,
            date,
            start_time,
            end_time,
            meeting_link,
            status,
            live_status,
            cancellation_reason,
            room_id,
            course_id,
            teacher_id,
            student_id,
            enrollment_id,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn schedule_id(&self) -> Option<&ScheduleId> {
        self.schedule_id.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn meeting_link(&self) -> Option<&str> {
        self.meeting_link.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn live_status(&self) -> LiveStatus {
        self.live_status
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    pub fn teacher_id(&self) -> &UserId {
        &self.teacher_id
    }

    pub fn student_id(&self) -> Option<&UserId> {
        self.student_id.as_ref()
    }

    pub fn enrollment_id(&self) -> Option<&EnrollmentId> {
        self.enrollment_id.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_live(&self) -> bool {
        self.live_status == LiveStatus::Live
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the actor may manage this session's lifecycle
    /// (start/end/cancel/disposition): the owning teacher, or any admin.
    pub fn can_manage(&self, actor_id: &UserId, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::Teacher => &self.teacher_id == actor_id,
            Role::Student | Role::Parent => false,
        }
    }

    /// Validates that the actor may manage this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless the actor is the owning teacher or an admin
    pub fn authorize_manage(&self, actor_id: &UserId, role: Role) -> Result<(), DomainError> {
        if self.can_manage(actor_id, role) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the session's teacher or an admin may manage this session",
            ))
        }
    }

    /// Validates that the actor may join the live room.
    ///
    /// Teachers must own the session and may join in any live state; admins
    /// may always join; the assigned student may join only while the session
    /// is live. Other roles never join.
    ///
    /// # Errors
    ///
    /// - `Forbidden` with a caller-facing message describing the gate
    pub fn authorize_join(&self, actor_id: &UserId, role: Role) -> Result<(), DomainError> {
        match role {
            Role::Admin => Ok(()),
            Role::Teacher => {
                if &self.teacher_id == actor_id {
                    Ok(())
                } else {
                    Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "You are not the teacher of this session",
                    ))
                }
            }
            Role::Student => {
                if self.student_id.as_ref() != Some(actor_id) {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "You are not assigned to this session",
                    ));
                }
                if self.live_status != LiveStatus::Live {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "Session is not live yet. Wait for the teacher to start.",
                    ));
                }
                Ok(())
            }
            Role::Parent => Err(DomainError::new(
                ErrorCode::Forbidden,
                "Parents cannot join live sessions",
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the room id, deriving and storing one if absent.
    pub fn ensure_room_id(&mut self) -> &str {
        if self.room_id.is_none() {
            self.room_id = Some(derive_room_id(&self.id));
        }
        self.room_id.as_deref().unwrap_or_default()
    }

    /// Cancel this occurrence on the administrative axis only.
    ///
    /// The live axis is left untouched: cancelling a session that already
    /// ended keeps `live_status = Ended`.
    pub fn cancel(&mut self, reason: Option<String>) {
        self.status = SessionStatus::Cancelled;
        self.cancellation_reason =
            Some(reason.unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string()));
        self.updated_at = Utc::now();
    }

    /// Transition the live axis to `Live`.
    ///
    /// Idempotent: returns `false` without any state change when the session
    /// is already live, `true` when the transition happened. Guarantees a
    /// room id exists afterwards.
    pub fn start_live(&mut self) -> bool {
        if self.live_status == LiveStatus::Live {
            return false;
        }
        self.ensure_room_id();
        self.live_status = LiveStatus::Live;
        self.updated_at = Utc::now();
        true
    }

    /// Transition the live axis to `Ended`.
    ///
    /// Idempotent: returns `false` without any state change when the session
    /// already ended.
    pub fn end_live(&mut self) -> bool {
        if self.live_status == LiveStatus::Ended {
            return false;
        }
        self.live_status = LiveStatus::Ended;
        self.updated_at = Utc::now();
        true
    }

    /// Mark the occurrence completed (administrative axis).
    pub fn mark_completed(&mut self) {
        self.status = SessionStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Mark the occurrence as a makeup class (administrative axis).
    pub fn mark_makeup(&mut self) {
        self.status = SessionStatus::Makeup;
        self.updated_at = Utc::now();
    }
}
