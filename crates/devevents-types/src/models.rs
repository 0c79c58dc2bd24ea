//! Transport shapes: what clients send in and what the API sends back.
//!
//! Input shapes never carry an id or the deletion flag; those belong to the
//! store. View shapes are plain projections of the entities, converted with
//! explicit `From` impls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::ids::{EventId, SpeakerId};
use crate::structs::{Event, EventFields, Speaker, SpeakerFields};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Body of event create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EventInput {
    /// Optional display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free text, at most 200 characters.
    #[validate(length(max = 200))]
    pub description: String,
    /// Start timestamp (RFC 3339).
    pub start_date: DateTime<Utc>,
    /// End timestamp (RFC 3339).
    pub end_date: DateTime<Utc>,
}

impl From<EventInput> for EventFields {
    fn from(input: EventInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
        }
    }
}

/// Body of the add-speaker request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SpeakerInput {
    /// Speaker's name.
    pub name: String,
    /// Title of the talk.
    pub talk_title: String,
    /// Abstract of the talk.
    pub talk_description: String,
    /// Link to the speaker's `LinkedIn` profile.
    pub linked_in_profile: String,
}

impl From<SpeakerInput> for SpeakerFields {
    fn from(input: SpeakerInput) -> Self {
        Self {
            name: input.name,
            talk_title: input.talk_title,
            talk_description: input.talk_description,
            linked_in_profile: input.linked_in_profile,
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// An event as returned by the API, speakers included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct EventView {
    /// Event identifier.
    pub id: EventId,
    /// Optional display title.
    pub title: Option<String>,
    /// Free text description.
    pub description: String,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// End timestamp.
    pub end_date: DateTime<Utc>,
    /// Whether the event has been logically deleted.
    pub is_deleted: bool,
    /// Speakers in insertion order.
    pub speakers: Vec<SpeakerView>,
}

impl From<Event> for EventView {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            start_date: event.start_date,
            end_date: event.end_date,
            is_deleted: event.is_deleted,
            speakers: event.speakers.into_iter().map(SpeakerView::from).collect(),
        }
    }
}

/// A speaker as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SpeakerView {
    /// Speaker identifier.
    pub id: SpeakerId,
    /// The event this speaker belongs to.
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

impl From<Speaker> for SpeakerView {
    fn from(speaker: Speaker) -> Self {
        Self {
            id: speaker.id,
            event_id: speaker.event_id,
            name: speaker.name,
            talk_title: speaker.talk_title,
            talk_description: speaker.talk_description,
            linked_in_profile: speaker.linked_in_profile,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn event_input_uses_camel_case() {
        let input: EventInput = serde_json::from_value(serde_json::json!({
            "title": "Conf",
            "description": "desc",
            "startDate": "2026-03-01T09:00:00Z",
            "endDate": "2026-03-02T18:00:00Z",
        }))
        .unwrap();
        assert_eq!(input.title.as_deref(), Some("Conf"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn event_input_title_is_optional() {
        let input: EventInput = serde_json::from_value(serde_json::json!({
            "description": "desc",
            "startDate": "2026-03-01T09:00:00Z",
            "endDate": "2026-03-02T18:00:00Z",
        }))
        .unwrap();
        assert!(input.title.is_none());
    }

    #[test]
    fn overlong_description_fails_validation() {
        let input = EventInput {
            title: None,
            description: "x".repeat(201),
            start_date: Utc::now(),
            end_date: Utc::now(),
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn view_serializes_nested_speakers() {
        let event_id = EventId::new();
        let view = EventView {
            id: event_id,
            title: None,
            description: String::from("desc"),
            start_date: Utc::now(),
            end_date: Utc::now(),
            is_deleted: false,
            speakers: vec![SpeakerView {
                id: SpeakerId::new(),
                event_id,
                name: String::from("Bob"),
                talk_title: String::from("Go Internals"),
                talk_description: String::from("..."),
                linked_in_profile: String::from("..."),
            }],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["isDeleted"], false);
        assert_eq!(json["speakers"][0]["talkTitle"], "Go Internals");
        assert_eq!(json["speakers"][0]["eventId"], event_id.to_string());
        assert_eq!(json["speakers"][0]["linkedInProfile"], "...");
    }
}
