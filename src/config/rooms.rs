//! Room provider configuration.

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// External room provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomProviderConfig {
    /// Provider API base URL.
    pub base_url: String,

    /// Provider API key. Kept as a plain string here; the client wraps it
    /// in `SecretString` at construction.
    pub api_key: String,
}

impl RoomProviderConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("ROOMS_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidRoomProviderUrl);
        }
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("ROOMS_API_KEY"));
        }
        Ok(())
    }

    /// Production additionally requires HTTPS.
    pub fn validate_for(&self, environment: &Environment) -> Result<(), ValidationError> {
        self.validate()?;
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::RoomProviderMustBeHttps);
        }
        Ok(())
    }
}
