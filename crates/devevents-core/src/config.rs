//! Configuration loading and typed config structures for the DevEvents service.
//!
//! The canonical configuration lives in `devevents-config.yaml` at the
//! project root. Every section has defaults, so a partial (or missing) file
//! is fine for local development. Secrets and connection strings are
//! normally supplied through environment variables instead of the file.

use std::path::Path;

use devevents_auth::{AuthError, TokenConfig};
pub use devevents_db::{DatabaseConfig, StorageBackend};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds an unusable value.
    #[error("invalid value for {name}: {message}")]
    Env {
        /// The environment variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `devevents-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Storage backend and pool settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values (see
    /// [`AppConfig::apply_overrides`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for running without a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if an override cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override values with those found through `lookup`.
    ///
    /// - `DATABASE_URL` overrides `database.url`
    /// - `JWT_SECRET` overrides `auth.secret`
    /// - `JWT_ISSUER` overrides `auth.issuer`
    /// - `JWT_AUDIENCE` overrides `auth.audience`
    /// - `PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `PORT` is not a valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = lookup("JWT_SECRET") {
            self.auth.secret = val;
        }
        if let Some(val) = lookup("JWT_ISSUER") {
            self.auth.issuer = val;
        }
        if let Some(val) = lookup("JWT_AUDIENCE") {
            self.auth.audience = val;
        }
        if let Some(val) = lookup("PORT") {
            self.server.port = val.parse().map_err(|e| ConfigError::Env {
                name: "PORT",
                message: format!("{e}"),
            })?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Bearer token settings.
///
/// The secret has no default: it must come from the file or `JWT_SECRET`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// HMAC signing secret.
    #[serde(default)]
    pub secret: String,

    /// Expected and issued `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected and issued `aud` claim.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Accepted clock skew past expiry, in seconds.
    #[serde(default)]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Build the token service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the secret is missing or too short.
    pub fn token_config(&self) -> Result<TokenConfig, AuthError> {
        Ok(
            TokenConfig::new(self.secret.clone(), self.issuer.clone(), self.audience.clone())?
                .with_leeway_secs(self.leeway_secs),
        )
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: default_issuer(),
            audience: default_audience(),
            leeway_secs: 0,
        }
    }
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde defaults
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_issuer() -> String {
    String::from("devevents")
}

fn default_audience() -> String {
    String::from("devevents-clients")
}

fn default_log_level() -> String {
    String::from("info")
}
