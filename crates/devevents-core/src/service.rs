//! The event aggregate service.
//!
//! Sits between the HTTP layer and the repository. Inputs are validated
//! before any store access, and every id-keyed mutation looks the event up
//! first so a missing id is reported before a write is attempted.

use std::sync::Arc;

use devevents_db::EventRepository;
use devevents_types::{EventId, EventInput, EventView, SpeakerInput, SpeakerView};
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::error::ServiceError;

/// Use cases for the event aggregate.
///
/// Cheap to clone; clones share the same repository handle.
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    /// Wrap a repository.
    pub const fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// All events that are not deleted.
    pub async fn list(&self) -> Result<Vec<EventView>, ServiceError> {
        let events = self.repository.list_active().await?;
        debug!(count = events.len(), "Listed active events");
        Ok(events.into_iter().map(EventView::from).collect())
    }

    /// One event by id, deleted or not.
    pub async fn get(&self, id: EventId) -> Result<EventView, ServiceError> {
        match self.repository.get_by_id(id).await? {
            Some(event) => {
                debug!(event_id = %id, "Fetched event");
                Ok(EventView::from(event))
            }
            None => {
                debug!(event_id = %id, "Event not found");
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Create a new event from validated input.
    pub async fn create(&self, input: EventInput) -> Result<EventView, ServiceError> {
        input.validate()?;
        let event = self.repository.create(input.into()).await?;
        info!(event_id = %event.id, "Created event");
        Ok(EventView::from(event))
    }

    /// Replace the four editable fields of an existing event.
    pub async fn update(&self, id: EventId, input: EventInput) -> Result<(), ServiceError> {
        input.validate()?;
        self.require(id).await?;
        self.repository.update(id, input.into()).await?;
        info!(event_id = %id, "Updated event");
        Ok(())
    }

    /// Flag an existing event as deleted.
    pub async fn delete(&self, id: EventId) -> Result<(), ServiceError> {
        self.require(id).await?;
        self.repository.soft_delete(id).await?;
        info!(event_id = %id, "Deleted event");
        Ok(())
    }

    /// Append a speaker to an existing event.
    ///
    /// The repository repeats the existence check inside its transaction,
    /// so an event removed in between still yields [`ServiceError::NotFound`].
    pub async fn add_speaker(
        &self,
        id: EventId,
        input: SpeakerInput,
    ) -> Result<SpeakerView, ServiceError> {
        self.require(id).await?;
        match self.repository.add_speaker(id, input.into()).await {
            Ok(speaker) => {
                info!(event_id = %id, speaker_id = %speaker.id, "Added speaker");
                Ok(SpeakerView::from(speaker))
            }
            Err(e) => {
                let err = ServiceError::from(e);
                if let ServiceError::TransactionFailure(detail) = &err {
                    error!(event_id = %id, error = %detail, "Speaker transaction rolled back");
                }
                Err(err)
            }
        }
    }

    async fn require(&self, id: EventId) -> Result<(), ServiceError> {
        if self.repository.get_by_id(id).await?.is_some() {
            Ok(())
        } else {
            warn!(event_id = %id, "Mutation on unknown event");
            Err(ServiceError::NotFound(id))
        }
    }
}

impl core::fmt::Debug for EventService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventService").finish_non_exhaustive()
    }
}
