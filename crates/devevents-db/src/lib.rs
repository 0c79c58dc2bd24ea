//! Data layer for the DevEvents service.
//!
//! The [`EventRepository`] trait is the only way the rest of the workspace
//! touches storage. Two implementations ship with the crate:
//!
//! ```text
//! EventService
//!     |
//!     +-- EventRepository (trait object)
//!         |-- PgEventStore         (PostgreSQL via sqlx, production)
//!         +-- InMemoryEventStore   (tests, local development)
//! ```
//!
//! # Modules
//!
//! - [`repository`] -- The repository contract
//! - [`postgres`] -- Storage settings, `PostgreSQL` pool and migrations
//! - [`event_store`] -- `PostgreSQL` repository implementation
//! - [`memory`] -- In-memory repository implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod event_store;
pub mod memory;
pub mod postgres;
pub mod repository;

// Re-export primary types for convenience.
pub use error::DbError;
pub use event_store::{EventRow, PgEventStore, SpeakerRow};
pub use memory::InMemoryEventStore;
pub use postgres::{DatabaseConfig, PostgresPool, StorageBackend};
pub use repository::EventRepository;
