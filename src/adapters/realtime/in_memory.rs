//! In-memory realtime notifier for tests and single-process deployments.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::RealtimeNotifier;

/// One captured event.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedEvent {
    pub channel: String,
    pub event: String,
    pub payload: serde_json::Value,
}

/// Notifier that retains every published event in memory.
#[derive(Default)]
pub struct InMemoryNotifier {
    events: Mutex<Vec<PublishedEvent>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in order.
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events published to one channel, in order.
    pub fn events_on(&self, channel: &str) -> Vec<PublishedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.channel == channel)
            .collect()
    }
}

#[async_trait]
impl RealtimeNotifier for InMemoryNotifier {
    async fn publish(
        &self,
        channel: &str,
        event: &str,
        payload: serde_json::Value,
    ) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(PublishedEvent {
            channel: channel.to_string(),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }
}
