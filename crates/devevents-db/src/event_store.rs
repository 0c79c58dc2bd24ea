//! `PostgreSQL` implementation of [`EventRepository`].
//!
//! Tables: `dev_events` and `dev_event_speakers` (see `migrations/`).
//! Single-statement writes rely on statement atomicity. Speaker addition
//! opens an explicit transaction and holds a `FOR SHARE` lock on the event
//! row between the existence check and the insert.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use devevents_types::{Event, EventFields, EventId, Speaker, SpeakerFields, SpeakerId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::postgres::PostgresPool;
use crate::repository::EventRepository;

/// Operations on the `dev_events` and `dev_event_speakers` tables.
#[derive(Clone)]
pub struct PgEventStore {
    pool: PgPool,
}

impl PgEventStore {
    /// Create a store bound to a connection pool.
    pub fn new(pool: &PostgresPool) -> Self {
        Self {
            pool: pool.pool().clone(),
        }
    }

    /// Speakers for the given events, grouped by event id, in insertion order.
    async fn speakers_for(&self, event_ids: &[Uuid]) -> Result<BTreeMap<Uuid, Vec<Speaker>>, DbError> {
        if event_ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let rows = sqlx::query_as::<_, SpeakerRow>(
            r"SELECT id, dev_event_id, name, talk_title, talk_description, linked_in_profile
              FROM dev_event_speakers
              WHERE dev_event_id = ANY($1)
              ORDER BY id",
        )
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: BTreeMap<Uuid, Vec<Speaker>> = BTreeMap::new();
        for row in rows {
            grouped.entry(row.dev_event_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}

#[async_trait]
impl EventRepository for PgEventStore {
    async fn list_active(&self) -> Result<Vec<Event>, DbError> {
        let rows = sqlx::query_as::<_, EventRow>(
            r"SELECT id, title, description, start_date, end_date, is_deleted
              FROM dev_events
              WHERE NOT is_deleted
              ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut speakers = self.speakers_for(&ids).await?;

        let events: Vec<Event> = rows
            .into_iter()
            .map(|row| {
                let owned = speakers.remove(&row.id).unwrap_or_default();
                row.into_event(owned)
            })
            .collect();

        tracing::debug!(count = events.len(), "Listed active events");
        Ok(events)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, DbError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"SELECT id, title, description, start_date, end_date, is_deleted
              FROM dev_events
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut speakers = self.speakers_for(&[row.id]).await?;
        let owned = speakers.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_event(owned)))
    }

    async fn create(&self, fields: EventFields) -> Result<Event, DbError> {
        let id = EventId::new();

        let row = sqlx::query_as::<_, EventRow>(
            r"INSERT INTO dev_events (id, title, description, start_date, end_date, is_deleted)
              VALUES ($1, $2, $3, $4, $5, FALSE)
              RETURNING id, title, description, start_date, end_date, is_deleted",
        )
        .bind(id.into_inner())
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(DbError::from_write)?;

        tracing::debug!(event_id = %id, "Inserted event");
        Ok(row.into_event(Vec::new()))
    }

    async fn update(&self, id: EventId, fields: EventFields) -> Result<(), DbError> {
        let result = sqlx::query(
            r"UPDATE dev_events
              SET title = $2, description = $3, start_date = $4, end_date = $5
              WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .execute(&self.pool)
        .await
        .map_err(DbError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: EventId) -> Result<(), DbError> {
        // Matches already-deleted rows too, which keeps the call idempotent.
        let result = sqlx::query("UPDATE dev_events SET is_deleted = TRUE WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(DbError::from_write)?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(id));
        }
        Ok(())
    }

    async fn add_speaker(
        &self,
        event_id: EventId,
        fields: SpeakerFields,
    ) -> Result<Speaker, DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM dev_events WHERE id = $1 FOR SHARE")
                .bind(event_id.into_inner())
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            tx.rollback().await?;
            return Err(DbError::NotFound(event_id));
        }

        let speaker = Speaker::new(SpeakerId::new(), event_id, fields);

        // Dropping `tx` on an early return rolls the transaction back.
        sqlx::query(
            r"INSERT INTO dev_event_speakers
                (id, dev_event_id, name, talk_title, talk_description, linked_in_profile)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(speaker.id.into_inner())
        .bind(event_id.into_inner())
        .bind(&speaker.name)
        .bind(&speaker.talk_title)
        .bind(&speaker.talk_description)
        .bind(&speaker.linked_in_profile)
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::Transaction(format!("speaker insert failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| DbError::Transaction(format!("commit failed: {e}")))?;

        tracing::debug!(event_id = %event_id, speaker_id = %speaker.id, "Inserted speaker");
        Ok(speaker)
    }
}

/// A row from the `dev_events` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    /// Event ID.
    pub id: Uuid,
    /// Optional title.
    pub title: Option<String>,
    /// Description, `VARCHAR(200)`.
    pub description: String,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// End timestamp.
    pub end_date: DateTime<Utc>,
    /// Logical deletion flag.
    pub is_deleted: bool,
}

impl EventRow {
    fn into_event(self, speakers: Vec<Speaker>) -> Event {
        Event {
            id: EventId::from(self.id),
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            is_deleted: self.is_deleted,
            speakers,
        }
    }
}

/// A row from the `dev_event_speakers` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SpeakerRow {
    /// Speaker ID.
    pub id: Uuid,
    /// Owning event ID.
    pub dev_event_id: Uuid,
    /// Speaker's name.
    pub name: String,
    /// Title of the talk.
    pub talk_title: String,
    /// Abstract of the talk.
    pub talk_description: String,
    /// `LinkedIn` profile link.
    pub linked_in_profile: String,
}

impl From<SpeakerRow> for Speaker {
    fn from(row: SpeakerRow) -> Self {
        Self {
            id: SpeakerId::from(row.id),
            event_id: EventId::from(row.dev_event_id),
            name: row.name,
            talk_title: row.talk_title,
            talk_description: row.talk_description,
            linked_in_profile: row.linked_in_profile,
        }
    }
}
