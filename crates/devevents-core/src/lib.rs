//! Event aggregate service and configuration for the DevEvents service.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides
//! - [`error`] -- Service error type
//! - [`service`] -- Event use cases over an [`devevents_db::EventRepository`]

pub mod config;
pub mod error;
pub mod service;

pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, HttpConfig, LogFormat, LoggingConfig,
    StorageBackend,
};
pub use error::ServiceError;
pub use service::EventService;
