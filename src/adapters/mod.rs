//! Adapters - implementations of the port interfaces.
//!
//! - `postgres` - sqlx-backed repositories and read projections
//! - `rooms` - HTTP client for the external room provider
//! - `realtime` - Redis and in-memory notifiers
//! - `websocket` - in-process session rooms and viewer presence
//! - `http` - REST API surface

pub mod http;
pub mod postgres;
pub mod realtime;
pub mod rooms;
pub mod websocket;
