use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Which document store backs the `planets` collection and how to reach it.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    /// Connection string, e.g. `mongodb://localhost:27017`.
    pub uri: String,
    pub database_name: String,
    /// Left empty when the server does not require authentication.
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Insert the canonical planets when the collection starts out empty.
    #[serde(default)]
    pub seed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Mongo,
    /// In-process store. Nothing survives a restart.
    Memory,
}

impl DatabaseSettings {
    /// Credentials are only applied when a username is configured.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

impl Settings {
    /// Rejects settings that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than zero".to_string(),
            ));
        }
        if self.database.database_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.database_name must not be empty".to_string(),
            ));
        }
        if self.database.backend == StorageBackend::Mongo && self.database.uri.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.uri is required for the mongo backend".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values supplied on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct CliOverrides {
    /// Path to the configuration file (defaults to `config.toml`).
    #[cfg_attr(feature = "clap", arg(long))]
    pub config: Option<PathBuf>,

    /// Port for the HTTP server.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}
