//! Classhive server binary.
//!
//! Bootstraps configuration, tracing, PostgreSQL, Redis, the room-provider
//! client, wires the command handlers to their adapters, and serves the
//! HTTP + WebSocket API.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use futures::StreamExt;
use http::{header, HeaderName, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use classhive::adapters::http::{
    calendar_routes, schedule_routes, session_routes, CalendarHandlers, ScheduleHandlers,
    SessionHandlers,
};
use classhive::adapters::postgres::{
    PostgresCalendarReader, PostgresDeadlineReader, PostgresDirectoryReader,
    PostgresScheduleRepository, PostgresSessionRepository,
};
use classhive::adapters::realtime::RedisNotifier;
use classhive::adapters::rooms::{HttpRoomClient, RoomClientConfig};
use classhive::adapters::websocket::{
    session_ws_router, PresenceRegistry, SessionRooms, WebSocketState,
};
use classhive::application::handlers::calendar::GetCalendarEventsHandler;
use classhive::application::handlers::schedule::{
    ApproveScheduleHandler, CancelScheduleHandler, CreateScheduleHandler, ProposeSessionHandler,
};
use classhive::application::handlers::session::{
    CancelSessionHandler, EndSessionHandler, JoinSessionHandler, StartSessionHandler,
    UpdateDispositionHandler,
};
use classhive::config::{AppConfig, ServerConfig};
use classhive::ports::{
    CalendarReader, DeadlineReader, DirectoryReader, RealtimeNotifier, RoomProvisioningClient,
    ScheduleRepository, SessionRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting classhive"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    tracing::info!("Connected to PostgreSQL");

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let redis_client = redis::Client::open(config.redis.url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_tokio_connection().await?;
    tracing::info!("Connected to Redis");

    // Adapters
    let schedules: Arc<dyn ScheduleRepository> =
        Arc::new(PostgresScheduleRepository::new(pool.clone()));
    let sessions: Arc<dyn SessionRepository> =
        Arc::new(PostgresSessionRepository::new(pool.clone()));
    let calendar: Arc<dyn CalendarReader> = Arc::new(PostgresCalendarReader::new(pool.clone()));
    let deadlines: Arc<dyn DeadlineReader> = Arc::new(PostgresDeadlineReader::new(pool.clone()));
    let directory: Arc<dyn DirectoryReader> = Arc::new(PostgresDirectoryReader::new(pool));
    let notifier: Arc<dyn RealtimeNotifier> = Arc::new(RedisNotifier::new(redis_conn));
    let room_client: Arc<dyn RoomProvisioningClient> = Arc::new(HttpRoomClient::new(
        RoomClientConfig::new(config.rooms.base_url.clone(), config.rooms.api_key.clone()),
    ));

    // Command and query handlers
    let schedule_handlers = ScheduleHandlers {
        create: Arc::new(CreateScheduleHandler::new(
            schedules.clone(),
            sessions.clone(),
        )),
        propose: Arc::new(ProposeSessionHandler::new(
            schedules.clone(),
            sessions.clone(),
        )),
        approve: Arc::new(ApproveScheduleHandler::new(schedules.clone())),
        cancel: Arc::new(CancelScheduleHandler::new(schedules, sessions.clone())),
    };
    let session_handlers = SessionHandlers {
        cancel: Arc::new(CancelSessionHandler::new(sessions.clone())),
        start: Arc::new(StartSessionHandler::new(
            sessions.clone(),
            directory.clone(),
            notifier.clone(),
        )),
        end: Arc::new(EndSessionHandler::new(sessions.clone(), notifier)),
        join: Arc::new(JoinSessionHandler::new(
            sessions.clone(),
            directory.clone(),
            room_client,
        )),
        disposition: Arc::new(UpdateDispositionHandler::new(sessions)),
    };
    let calendar_handlers = CalendarHandlers {
        get_events: Arc::new(GetCalendarEventsHandler::new(
            calendar, deadlines, directory,
        )),
    };

    // WebSocket fan-out: session events published to Redis are bridged
    // into in-process rooms so connected viewers receive them.
    let rooms = Arc::new(SessionRooms::with_default_capacity());
    let presence = Arc::new(PresenceRegistry::new());
    let ws_state = WebSocketState::new(rooms.clone(), presence);
    tokio::spawn(run_event_bridge(redis_client, rooms));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/schedules", schedule_routes(schedule_handlers))
        .nest("/api/sessions", session_routes(session_handlers))
        .nest("/api/calendar", calendar_routes(calendar_handlers))
        .nest("/ws", session_ws_router(ws_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_secs,
                )))
                .layer(build_cors(&config.server)),
        );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn build_cors(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
            HeaderName::from_static("x-user-role"),
        ])
}

/// Envelope written by `RedisNotifier` on publish.
#[derive(serde::Deserialize)]
struct EventEnvelope {
    event: String,
    payload: serde_json::Value,
}

/// Subscribes to all session channels and re-publishes into the in-process
/// rooms. Reconnects on subscription loss so a Redis blip does not leave
/// viewers permanently silent.
async fn run_event_bridge(client: redis::Client, rooms: Arc<SessionRooms>) {
    loop {
        if let Err(e) = subscribe_and_forward(&client, &rooms).await {
            tracing::error!(error = %e, "Realtime bridge lost, reconnecting");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

async fn subscribe_and_forward(
    client: &redis::Client,
    rooms: &Arc<SessionRooms>,
) -> Result<(), redis::RedisError> {
    let mut pubsub = client.get_async_connection().await?.into_pubsub();
    pubsub.psubscribe("session-*").await?;
    tracing::info!("Realtime bridge subscribed");

    let mut stream = pubsub.on_message();
    while let Some(msg) = stream.next().await {
        let channel = msg.get_channel_name().to_string();
        let raw: String = match msg.get_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(channel = %channel, error = %e, "Non-string event payload");
                continue;
            }
        };

        match serde_json::from_str::<EventEnvelope>(&raw) {
            Ok(envelope) => {
                if let Err(e) = rooms
                    .publish(&channel, &envelope.event, envelope.payload)
                    .await
                {
                    tracing::warn!(channel = %channel, error = %e, "Room fan-out failed");
                }
            }
            Err(e) => {
                tracing::warn!(channel = %channel, error = %e, "Malformed event envelope");
            }
        }
    }

    Ok(())
}
