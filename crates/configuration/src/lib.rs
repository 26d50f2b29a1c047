use crate::error::ConfigError;
use config::{Environment, File};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{CliOverrides, DatabaseSettings, ServerSettings, Settings, StorageBackend};

/// Prefix for environment overrides, e.g. `STARWARS__DATABASE__URI`.
pub const ENV_PREFIX: &str = "STARWARS";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Loads the application configuration.
///
/// Sources are layered from weakest to strongest: built-in defaults, the
/// TOML file (`config.toml` unless `--config` names another one), the
/// `STARWARS__*` environment variables, and finally the CLI overrides. The
/// default file is optional; an explicitly requested one must exist.
pub fn load_settings(overrides: &CliOverrides) -> Result<Settings, ConfigError> {
    dotenvy::dotenv().ok();

    let file = match &overrides.config {
        Some(path) => File::from(path.as_path()).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let mut builder = with_defaults(config::Config::builder())?
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

    if let Some(port) = overrides.port {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(
        backend = ?settings.database.backend,
        database = %settings.database.database_name,
        port = settings.server.port,
        "Configuration loaded."
    );
    Ok(settings)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.backend", "mongo")?
        .set_default("database.uri", "mongodb://localhost:27017")?
        .set_default("database.database_name", "starwars")?
        .set_default("database.username", "")?
        .set_default("database.password", "")?
        .set_default("database.seed", false)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 9090

            [database]
            backend = "memory"
            database_name = "galaxy"
            seed = true
            "#,
        );
        let overrides = CliOverrides { config: Some(file.path().to_path_buf()), port: None };

        let settings = load_settings(&overrides).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert_eq!(settings.database.database_name, "galaxy");
        assert!(settings.database.seed);
        assert!(!settings.database.has_credentials());
    }

    #[test]
    fn cli_port_wins_over_file() {
        let file = write_config("[server]\nport = 9090\n");
        let overrides = CliOverrides { config: Some(file.path().to_path_buf()), port: Some(7000) };

        let settings = load_settings(&overrides).unwrap();
        assert_eq!(settings.server.port, 7000);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let overrides = CliOverrides {
            config: Some("/definitely/not/here/config.toml".into()),
            port: None,
        };
        assert!(matches!(load_settings(&overrides), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn validation_rejects_empty_database_name() {
        let file = write_config("[database]\ndatabase_name = \"  \"\n");
        let overrides = CliOverrides { config: Some(file.path().to_path_buf()), port: None };
        assert!(matches!(load_settings(&overrides), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn validation_rejects_zero_port() {
        let file = write_config("[server]\nport = 0\n");
        let overrides = CliOverrides { config: Some(file.path().to_path_buf()), port: None };
        assert!(matches!(load_settings(&overrides), Err(ConfigError::ValidationError(_))));
    }
}
