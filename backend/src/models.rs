// Database models for Diesel
use calendar_shared::{Event, NewEvent};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
}

/// Columns replaced by an edit
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::events)]
pub struct EventChanges {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub description: String,
}

impl EventRow {
    pub fn new(id: Uuid, new: NewEvent) -> Self {
        Self {
            id,
            title: new.title,
            start_time: new.start_time,
            end_time: new.end_time,
            description: new.description,
        }
    }
}

impl From<NewEvent> for EventChanges {
    fn from(new: NewEvent) -> Self {
        Self {
            title: new.title,
            start_time: new.start_time,
            end_time: new.end_time,
            description: new.description,
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            title: row.title,
            start_time: row.start_time,
            end_time: row.end_time,
            description: row.description,
        }
    }
}
