//! WebSocket adapter - in-process session rooms for live viewers.
//!
//! Clients open `GET /ws/sessions/:id` to watch a session's event stream.
//! `SessionRooms` fans events out per session over `tokio::broadcast` and
//! doubles as an in-process `RealtimeNotifier`; `PresenceRegistry` tracks
//! which users currently hold a connection.

mod handler;
mod messages;
mod presence;
mod rooms;

pub use handler::{session_ws_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, ConnectedMessage, ServerMessage, SessionEvent};
pub use presence::PresenceRegistry;
pub use rooms::{ClientId, SessionRooms};
