//! In-memory implementation of [`EventRepository`].
//!
//! Mirrors the relational layout with two tables, events and speakers, kept
//! behind one [`RwLock`]. Holding the write lock is the transaction
//! boundary: a speaker addition checks the event and inserts the row without
//! releasing it, so no other writer can interleave.
//!
//! The store enforces the same constraints as the `PostgreSQL` schema
//! (description length, speaker foreign key) and supports fault injection
//! for exercising rollback paths. Used by tests and by the server's `memory`
//! backend.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devevents_types::{
    DESCRIPTION_MAX_CHARS, Event, EventFields, EventId, Speaker, SpeakerFields, SpeakerId,
};
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::repository::EventRepository;

/// One row of the events table. Speakers live in their own table.
#[derive(Debug, Clone)]
struct EventRecord {
    id: EventId,
    title: Option<String>,
    description: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    is_deleted: bool,
}

impl EventRecord {
    fn to_event(&self, speakers: &[Speaker]) -> Event {
        Event {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            is_deleted: self.is_deleted,
            speakers: speakers
                .iter()
                .filter(|s| s.event_id == self.id)
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    events: Vec<EventRecord>,
    speakers: Vec<Speaker>,
}

impl Tables {
    fn find_mut(&mut self, id: EventId) -> Option<&mut EventRecord> {
        self.events.iter_mut().find(|e| e.id == id)
    }
}

/// Event repository held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    tables: RwLock<Tables>,
    fail_next_speaker_insert: AtomicBool,
}

impl InMemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next speaker insert fail after its existence check passed.
    ///
    /// The failing attempt is rolled back and reported as
    /// [`DbError::Transaction`]. The switch resets after one use.
    pub fn fail_next_speaker_insert(&self) {
        self.fail_next_speaker_insert.store(true, Ordering::SeqCst);
    }

    /// Number of rows in the events table, deleted ones included.
    pub async fn event_count(&self) -> usize {
        self.tables.read().await.events.len()
    }

    /// Number of rows in the speakers table.
    pub async fn speaker_count(&self) -> usize {
        self.tables.read().await.speakers.len()
    }
}

/// Reject descriptions that would not fit the `VARCHAR(200)` column.
fn check_description(fields: &EventFields) -> Result<(), DbError> {
    if fields.description_fits() {
        Ok(())
    } else {
        Err(DbError::Constraint(format!(
            "description exceeds {DESCRIPTION_MAX_CHARS} characters"
        )))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn list_active(&self) -> Result<Vec<Event>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .filter(|e| !e.is_deleted)
            .map(|e| e.to_event(&tables.speakers))
            .collect())
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .events
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.to_event(&tables.speakers)))
    }

    async fn create(&self, fields: EventFields) -> Result<Event, DbError> {
        check_description(&fields)?;

        let event = Event::new(EventId::new(), fields);
        let record = EventRecord {
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            is_deleted: false,
        };

        self.tables.write().await.events.push(record);
        Ok(event)
    }

    async fn update(&self, id: EventId, fields: EventFields) -> Result<(), DbError> {
        check_description(&fields)?;

        let mut tables = self.tables.write().await;
        let record = tables.find_mut(id).ok_or(DbError::NotFound(id))?;
        record.title = fields.title;
        record.description = fields.description;
        record.start_date = fields.start_date;
        record.end_date = fields.end_date;
        Ok(())
    }

    async fn soft_delete(&self, id: EventId) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let record = tables.find_mut(id).ok_or(DbError::NotFound(id))?;
        record.is_deleted = true;
        Ok(())
    }

    async fn add_speaker(
        &self,
        event_id: EventId,
        fields: SpeakerFields,
    ) -> Result<Speaker, DbError> {
        let mut tables = self.tables.write().await;

        if !tables.events.iter().any(|e| e.id == event_id) {
            return Err(DbError::NotFound(event_id));
        }

        let speaker = Speaker::new(SpeakerId::new(), event_id, fields);

        if self.fail_next_speaker_insert.swap(false, Ordering::SeqCst) {
            return Err(DbError::Transaction(String::from(
                "speaker insert failed: injected fault",
            )));
        }

        tables.speakers.push(speaker.clone());
        Ok(speaker)
    }
}
