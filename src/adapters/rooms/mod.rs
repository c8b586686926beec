//! Room provider adapter - HTTP client for the external meeting service.

mod http_client;

pub use http_client::{HttpRoomClient, RoomClientConfig};
