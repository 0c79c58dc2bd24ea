//! The event repository contract.
//!
//! Every write takes a complete field set and is applied as-is; there is no
//! change tracking. Only [`EventRepository::add_speaker`] spans more than one
//! statement, and it runs inside a single transaction.

use async_trait::async_trait;
use devevents_types::{Event, EventFields, EventId, Speaker, SpeakerFields};

use crate::error::DbError;

/// Persistence operations for the event aggregate.
///
/// Implementations must be safe to share across concurrently running
/// requests; consistency between concurrent writers is left to the store.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All events not flagged as deleted, speakers populated, in insertion
    /// order.
    async fn list_active(&self) -> Result<Vec<Event>, DbError>;

    /// The event with this id, deleted or not.
    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, DbError>;

    /// Persist a new event under a freshly generated id.
    ///
    /// Each call creates a new aggregate; identical submissions are never
    /// merged.
    async fn create(&self, fields: EventFields) -> Result<Event, DbError>;

    /// Replace title, description, start and end date.
    ///
    /// The deletion flag and the speakers are untouched. Returns
    /// [`DbError::NotFound`] if no such event exists.
    async fn update(&self, id: EventId, fields: EventFields) -> Result<(), DbError>;

    /// Flag the event as deleted. Succeeds again on an already deleted event.
    ///
    /// Returns [`DbError::NotFound`] if no such event exists.
    async fn soft_delete(&self, id: EventId) -> Result<(), DbError>;

    /// Check that the event exists and append a speaker to it, atomically.
    ///
    /// Returns [`DbError::NotFound`] without writing anything when the event
    /// is missing, and [`DbError::Transaction`] when the write fails after
    /// the check; in that case nothing from the attempt is visible.
    async fn add_speaker(&self, event_id: EventId, fields: SpeakerFields)
    -> Result<Speaker, DbError>;
}
