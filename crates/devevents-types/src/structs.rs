//! Core entity structs for the DevEvents domain.
//!
//! An [`Event`] together with its [`Speaker`] collection forms one aggregate.
//! Speakers are owned by their event: they are created through the event and
//! never move to another one. The `*Fields` structs carry the complete set of
//! writable columns for a single write; the repository never diffs entities.

use chrono::{DateTime, Utc};

use crate::ids::{EventId, SpeakerId};

/// Maximum length of [`Event::description`], in characters.
///
/// Mirrors the `VARCHAR(200)` column in the `dev_events` table.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A developer event (conference, meetup, workshop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Assigned at creation, never changes.
    pub id: EventId,
    /// Optional display title.
    pub title: Option<String>,
    /// Free text, at most [`DESCRIPTION_MAX_CHARS`] characters.
    pub description: String,
    /// When the event starts.
    pub start_date: DateTime<Utc>,
    /// When the event ends. Not required to be after `start_date`.
    pub end_date: DateTime<Utc>,
    /// Logical deletion flag. Deleted events stay retrievable by id.
    pub is_deleted: bool,
    /// Speakers in insertion order.
    pub speakers: Vec<Speaker>,
}

impl Event {
    /// Build a fresh, active event with no speakers from a field set.
    pub fn new(id: EventId, fields: EventFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            start_date: fields.start_date,
            end_date: fields.end_date,
            is_deleted: false,
            speakers: Vec::new(),
        }
    }

    /// Replace the four mutable fields wholesale.
    ///
    /// `is_deleted` and `speakers` are left untouched.
    pub fn apply(&mut self, fields: EventFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.start_date = fields.start_date;
        self.end_date = fields.end_date;
    }

    /// Snapshot of the four mutable fields.
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// The complete set of fields written by event create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    /// Optional display title.
    pub title: Option<String>,
    /// Free text, at most [`DESCRIPTION_MAX_CHARS`] characters.
    pub description: String,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// End timestamp.
    pub end_date: DateTime<Utc>,
}

impl EventFields {
    /// Whether the description fits the storage column.
    pub fn description_fits(&self) -> bool {
        self.description.chars().count() <= DESCRIPTION_MAX_CHARS
    }
}

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// A speaker giving a talk at an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    /// Assigned at creation.
    pub id: SpeakerId,
    /// Back-reference to the owning event.
    pub event_id: EventId,
    /// Speaker's name.
    pub name: String,
    /// Title of the talk.
    pub talk_title: String,
    /// Abstract of the talk.
    pub talk_description: String,
    /// Link to the speaker's `LinkedIn` profile.
    pub linked_in_profile: String,
}

impl Speaker {
    /// Attach a field set to an event under a fresh identity.
    pub fn new(id: SpeakerId, event_id: EventId, fields: SpeakerFields) -> Self {
        Self {
            id,
            event_id,
            name: fields.name,
            talk_title: fields.talk_title,
            talk_description: fields.talk_description,
            linked_in_profile: fields.linked_in_profile,
        }
    }
}

/// The fields written when a speaker is added to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerFields {
    /// Speaker's name.
    pub name: String,
    /// Title of the talk.
    pub talk_title: String,
    /// Abstract of the talk.
    pub talk_description: String,
    /// Link to the speaker's `LinkedIn` profile.
    pub linked_in_profile: String,
}
