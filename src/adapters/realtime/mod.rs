//! Realtime notifier adapters.
//!
//! - `RedisNotifier` - cross-process PUBLISH for multi-server deployments
//! - `InMemoryNotifier` - single-process capture, used by the integration
//!   tests and local development without Redis

mod in_memory;
mod redis_notifier;

pub use in_memory::InMemoryNotifier;
pub use redis_notifier::RedisNotifier;
