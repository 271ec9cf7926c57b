//! Domain types shared between the calendar backend and the upstream fetcher.

pub mod api;
pub mod calendar;
pub mod datetime;
pub mod form;
pub mod models;

pub use calendar::{
    build_month_grid, next_month_token, parse_month_token, parse_month_token_at,
    prev_month_token, CalendarCell, FormatError, MonthGrid, MonthToken,
};
pub use form::{EventForm, FormErrors};
pub use models::{Event, EventsByDate, FetchedEvent, NewEvent, TITLE_MAX_CHARS};
