//! Event endpoint handlers.
//!
//! Reads are public. Writes require an [`Authenticated`] caller, which is
//! extracted before the body so an unauthenticated request is rejected
//! without being parsed.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/api/dev-events` | List events that are not deleted |
//! | `GET` | `/api/dev-events/{id}` | Get one event, deleted or not |
//! | `POST` | `/api/dev-events` | Create an event |
//! | `PUT` | `/api/dev-events/{id}` | Replace an event's editable fields |
//! | `DELETE` | `/api/dev-events/{id}` | Flag an event as deleted |
//! | `POST` | `/api/dev-events/{id}/speakers` | Add a speaker to an event |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use devevents_types::{EventId, EventInput, EventView, SpeakerInput};
use tracing::debug;
use uuid::Uuid;

use crate::auth::Authenticated;
use crate::error::ApiError;
use crate::state::AppState;

/// Base path of the event resource.
pub const EVENTS_PATH: &str = "/api/dev-events";

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// List all events that are not deleted, speakers included.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventView>>, ApiError> {
    Ok(Json(state.events.list().await?))
}

/// Get one event by id, deleted or not.
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<Json<EventView>, ApiError> {
    let id = parse_event_id(&id_str)?;
    Ok(Json(state.events.get(id).await?))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Create an event. Responds 201 with the stored event and its location.
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let input = json_body(payload)?;
    let event = state.events.create(input).await?;
    debug!(subject = %auth.subject, event_id = %event.id, "Event created via API");

    let location = format!("{EVENTS_PATH}/{}", event.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(event),
    ))
}

/// Replace title, description, start and end date of an event.
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    Path(id_str): Path<String>,
    payload: Result<Json<EventInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_event_id(&id_str)?;
    let input = json_body(payload)?;
    state.events.update(id, input).await?;
    debug!(subject = %auth.subject, event_id = %id, "Event updated via API");
    Ok(StatusCode::NO_CONTENT)
}

/// Flag an event as deleted.
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_event_id(&id_str)?;
    state.events.delete(id).await?;
    debug!(subject = %auth.subject, event_id = %id, "Event deleted via API");
    Ok(StatusCode::NO_CONTENT)
}

/// Add a speaker to an event. Responds 204 with no body.
pub async fn add_speaker(
    State(state): State<Arc<AppState>>,
    auth: Authenticated,
    Path(id_str): Path<String>,
    payload: Result<Json<SpeakerInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_event_id(&id_str)?;
    let input = json_body(payload)?;
    let speaker = state.events.add_speaker(id, input).await?;
    debug!(
        subject = %auth.subject,
        event_id = %id,
        speaker_id = %speaker.id,
        "Speaker added via API"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a JSON body, reporting any rejection as a validation error.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// Parse an event id from a path segment.
fn parse_event_id(s: &str) -> Result<EventId, ApiError> {
    s.parse::<Uuid>()
        .map(EventId::from)
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_id_rejects_garbage() {
        assert!(matches!(
            parse_event_id("not-a-uuid"),
            Err(ApiError::InvalidUuid(msg)) if msg.starts_with("not-a-uuid")
        ));
    }

    #[test]
    fn parse_event_id_accepts_uuid() {
        let id = Uuid::now_v7();
        assert!(matches!(parse_event_id(&id.to_string()), Ok(parsed) if parsed == EventId::from(id)));
    }
}
