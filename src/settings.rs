//! Layered service configuration.
//!
//! Values are resolved in order: built-in defaults, an optional TOML file,
//! then `TASK_TRACKER_*` environment variables with `__` separating nested
//! keys (for example `TASK_TRACKER_STORAGE__URL`).

use crate::assignment::domain::AssignmentPolicy;
use ::config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "TASK_TRACKER";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),
    /// The merged configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Store implementation selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `PostgreSQL` through Diesel.
    Postgres,
    /// Process-local store; contents are lost on exit.
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Which store to run.
    pub backend: StorageBackend,
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Upper bound of pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connect_timeout_secs: u64,
    /// Apply the schema at startup.
    pub run_migrations: bool,
}

impl StorageConfig {
    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

/// Assignment policy settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AssignmentConfig {
    /// Load margin within which the parent task's assignee is preferred.
    pub affinity_margin: u64,
}

impl AssignmentConfig {
    /// Builds the configured policy.
    #[must_use]
    pub const fn policy(self) -> AssignmentPolicy {
        AssignmentPolicy::new(self.affinity_margin)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrackerConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Store selection and pooling.
    pub storage: StorageConfig,
    /// Tracing subscriber.
    pub logging: LoggingConfig,
    /// Assignment policy.
    pub assignment: AssignmentConfig,
}

impl TrackerConfig {
    /// Loads configuration from defaults, `path`, and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when the file is missing or a value has
    /// the wrong type, and [`SettingsError::Invalid`] when validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(path, None)
    }

    /// Loads configuration like [`TrackerConfig::load`], reading overrides
    /// from `env` instead of the process environment when given.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::load`].
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("server.bind_address", "127.0.0.1:8000")?
            .set_default("storage.backend", "postgres")?
            .set_default("storage.url", "postgres://localhost/task_tracker")?
            .set_default("storage.max_connections", 10_i64)?
            .set_default("storage.connect_timeout_secs", 5_i64)?
            .set_default("storage.run_migrations", true)?
            .set_default("logging.filter", "info")?
            .set_default("logging.format", "pretty")?
            .set_default(
                "assignment.affinity_margin",
                i64::try_from(AssignmentPolicy::DEFAULT_AFFINITY_MARGIN).unwrap_or(i64::MAX),
            )?;

        if let Some(file) = path {
            builder = builder.add_source(File::from(file).format(FileFormat::Toml));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.storage.backend == StorageBackend::Postgres && self.storage.url.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "storage.url is required for the postgres backend".to_owned(),
            ));
        }
        if self.storage.max_connections == 0 {
            return Err(SettingsError::Invalid(
                "storage.max_connections must be at least 1".to_owned(),
            ));
        }
        if self.storage.connect_timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "storage.connect_timeout_secs must be at least 1".to_owned(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "logging.filter must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
