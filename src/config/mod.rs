//! Application configuration.
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `CLASSHIVE`
//! prefix and `__` (double underscore) as the nesting separator:
//!
//! - `CLASSHIVE__SERVER__PORT=8080` -> `server.port = 8080`
//! - `CLASSHIVE__DATABASE__URL=...` -> `database.url = ...`

mod database;
mod error;
mod redis;
mod rooms;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use rooms::RoomProviderConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub redis: RedisConfig,

    /// External room provider (join-link minting).
    pub rooms: RoomProviderConfig,
}

impl AppConfig {
    /// Load configuration from the environment (and `.env` in development).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLASSHIVE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.rooms.validate_for(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
