//! WebSocket upgrade handler for live session viewers.
//!
//! Route: `GET /ws/sessions/:id`. After the upgrade the connection joins
//! the session's room, receives every event published to it, and answers
//! application-level pings until either side disconnects.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::adapters::http::middleware::AuthUser;
use crate::domain::foundation::SessionId;

use super::messages::{ClientMessage, ConnectedMessage, ServerMessage, SessionEvent};
use super::presence::PresenceRegistry;
use super::rooms::{ClientId, SessionRooms};

/// Shared state for websocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub rooms: Arc<SessionRooms>,
    pub presence: Arc<PresenceRegistry>,
}

impl WebSocketState {
    pub fn new(rooms: Arc<SessionRooms>, presence: Arc<PresenceRegistry>) -> Self {
        Self { rooms, presence }
    }
}

/// Router for the websocket endpoint, nested under `/ws`.
pub fn session_ws_router(state: WebSocketState) -> Router {
    Router::new()
        .route("/sessions/:id", get(ws_handler))
        .with_state(state)
}

/// Handle the HTTP → WebSocket upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(session_id): Path<String>,
    State(state): State<WebSocketState>,
    user: AuthUser,
) -> Response {
    let session_id: SessionId = match session_id.parse() {
        Ok(id) => id,
        Err(_) => {
            return Response::builder()
                .status(400)
                .body("Invalid session ID".into())
                .unwrap();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, session_id, user, state))
}

async fn handle_socket(
    socket: WebSocket,
    session_id: SessionId,
    user: AuthUser,
    state: WebSocketState,
) {
    let (mut sender, mut receiver) = socket.split();
    let client_id = ClientId::new();

    let mut room_rx: broadcast::Receiver<SessionEvent> =
        state.rooms.join(&session_id, client_id).await;
    state
        .presence
        .connect(user.role, user.id.clone(), client_id)
        .await;

    let connected = ServerMessage::Connected(ConnectedMessage {
        session_id: session_id.to_string(),
        client_id: client_id.to_string(),
    });
    if send_message(&mut sender, &connected).await.is_err() {
        // Client disconnected before the handshake message went out.
        state.rooms.leave(&client_id).await;
        state
            .presence
            .disconnect(user.role, &user.id, &client_id)
            .await;
        return;
    }

    let (pong_tx, mut pong_rx) = tokio::sync::mpsc::channel::<()>(4);

    // Forward room broadcasts and pong replies to the client.
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                update = room_rx.recv() => match update {
                    Ok(event) => {
                        if send_message(&mut sender, &ServerMessage::Event(event))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "viewer lagged behind event stream");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                pong = pong_rx.recv() => match pong {
                    Some(()) => {
                        if send_message(&mut sender, &ServerMessage::Pong).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    });

    // Drain client messages until the socket closes.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    if let Ok(ClientMessage::Ping) = serde_json::from_str::<ClientMessage>(&text)
                    {
                        if pong_tx.send(()).await.is_err() {
                            break;
                        }
                    }
                }
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.rooms.leave(&client_id).await;
    state
        .presence
        .disconnect(user.role, &user.id, &client_id)
        .await;
    tracing::debug!(%session_id, %client_id, "viewer disconnected");
}

async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).unwrap_or_default();
    sender.send(Message::Text(json)).await
}
