//! HTTP implementation of RoomProvisioningClient.
//!
//! Calls the room provider's REST API to mint signed join URLs. A provider
//! failure surfaces as `ProvisioningError`; no retry is attempted because
//! the caller (a user clicking "join") will simply try again.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::RoomProvisioningClient;

/// Configuration for the room provider client.
pub struct RoomClientConfig {
    pub base_url: String,
    pub api_key: SecretString,
}

impl RoomClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
        }
    }
}

/// HTTP implementation of RoomProvisioningClient.
pub struct HttpRoomClient {
    config: RoomClientConfig,
    http_client: reqwest::Client,
}

impl HttpRoomClient {
    pub fn new(config: RoomClientConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct JoinLinkResponse {
    url: String,
}

#[async_trait]
impl RoomProvisioningClient for HttpRoomClient {
    async fn create_join_url(
        &self,
        room_id: &str,
        display_name: &str,
        is_presenter: bool,
    ) -> Result<String, DomainError> {
        let url = format!(
            "{}/rooms/{}/join-links",
            self.config.base_url.trim_end_matches('/'),
            room_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&serde_json::json!({
                "displayName": display_name,
                "presenter": is_presenter,
            }))
            .send()
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::ProvisioningError,
                    format!("Room provider unreachable: {}", e),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, room_id, "room provider rejected join-link request");
            return Err(DomainError::new(
                ErrorCode::ProvisioningError,
                format!("Room provider returned {}: {}", status, body),
            ));
        }

        let link: JoinLinkResponse = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::ProvisioningError,
                format!("Invalid room provider response: {}", e),
            )
        })?;

        Ok(link.url)
    }
}
