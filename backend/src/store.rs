//! Storage for locally kept events.
//!
//! Handlers talk to an [`EventStore`] trait object so the same routes run
//! against Postgres in production and against memory in tests or when no
//! database is configured.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use calendar_shared::{Event, NewEvent};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{EventChanges, EventRow};
use crate::schema::events;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Get a single event by its id, `None` if it does not exist.
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Store a new event under a fresh id.
    async fn create_event(&self, new: NewEvent) -> Result<Event>;

    /// Replace all fields of an existing event, `None` if it does not exist.
    async fn update_event(&self, id: Uuid, new: NewEvent) -> Result<Option<Event>>;

    /// Events starting in `[from, to)`, earliest first.
    async fn list_events_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Event>>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|event| event.id == id).cloned())
    }

    async fn create_event(&self, new: NewEvent) -> Result<Event> {
        let event = Event::from_new(Uuid::new_v4(), new);
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, new: NewEvent) -> Result<Option<Event>> {
        let mut events = self.events.write().await;
        let Some(slot) = events.iter_mut().find(|event| event.id == id) else {
            return Ok(None);
        };
        *slot = Event::from_new(id, new);
        Ok(Some(slot.clone()))
    }

    async fn list_events_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Event>> {
        let mut matching: Vec<Event> = self
            .events
            .read()
            .await
            .iter()
            .filter(|event| event.start_time >= from && event.start_time < to)
            .cloned()
            .collect();
        matching.sort_by_key(|event| event.start_time);
        Ok(matching)
    }
}

// ============================================================================
// Postgres store
// ============================================================================

pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a blocking diesel query on a pooled connection
    async fn run<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> QueryResult<T> + Send + 'static,
    {
        let conn = self
            .pool
            .get()
            .await
            .context("Failed to get database connection")?;

        conn.interact(query)
            .await
            .map_err(|err| anyhow!("Database interaction failed: {err}"))?
            .context("Database query failed")
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let row = self
            .run(move |conn| {
                events::table
                    .find(id)
                    .select(EventRow::as_select())
                    .first(conn)
                    .optional()
            })
            .await?;

        Ok(row.map(Event::from))
    }

    async fn create_event(&self, new: NewEvent) -> Result<Event> {
        let row = EventRow::new(Uuid::new_v4(), new);
        let row = self
            .run(move |conn| {
                diesel::insert_into(events::table)
                    .values(&row)
                    .returning(EventRow::as_returning())
                    .get_result(conn)
            })
            .await?;

        Ok(row.into())
    }

    async fn update_event(&self, id: Uuid, new: NewEvent) -> Result<Option<Event>> {
        let changes = EventChanges::from(new);
        let row = self
            .run(move |conn| {
                diesel::update(events::table.find(id))
                    .set(&changes)
                    .returning(EventRow::as_returning())
                    .get_result(conn)
                    .optional()
            })
            .await?;

        Ok(row.map(Event::from))
    }

    async fn list_events_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Event>> {
        let rows = self
            .run(move |conn| {
                events::table
                    .filter(events::start_time.ge(from))
                    .filter(events::start_time.lt(to))
                    .order_by(events::start_time.asc())
                    .select(EventRow::as_select())
                    .load(conn)
            })
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}
