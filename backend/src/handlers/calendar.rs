use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use calendar_shared::api::{CalendarPage, CalendarQuery};
use calendar_shared::{build_month_grid, next_month_token, parse_month_token, prev_month_token, MonthToken};
use chrono::{Datelike, NaiveDateTime, NaiveTime};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::views;

pub async fn index() -> &'static str {
    "hello"
}

/// Month view for `?month=YYYY-M`, the current month when absent.
///
/// A malformed token is a client error and answers 400 with the
/// `FormatError` message rather than a 500.
pub async fn calendar_html(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Html<String>> {
    let page = load_calendar_page(&state, query.month.as_deref()).await?;
    Ok(Html(views::calendar_page(&page).into_string()))
}

pub async fn calendar_json(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> ApiResult<Json<CalendarPage>> {
    Ok(Json(load_calendar_page(&state, query.month.as_deref()).await?))
}

/// Grid, navigation and events for the month named by `month`
async fn load_calendar_page(state: &AppState, month: Option<&str>) -> ApiResult<CalendarPage> {
    let first = parse_month_token(month)?;
    let grid = build_month_grid(first.year(), first.month())?;
    let shown = MonthToken::from(first);
    let next_month = next_month_token(first);

    let from = first.and_time(NaiveTime::MIN);
    let to = next_month
        .first_day()
        .map(|day| day.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MAX);
    let stored_events = state.store.list_events_between(from, to).await?;

    let mut upstream_events = state.fetcher.fetch_events_by_date().await;
    upstream_events.retain(|date, _| MonthToken::from(*date) == shown);

    tracing::debug!(
        month = %shown,
        stored = stored_events.len(),
        upstream_days = upstream_events.len(),
        "Loaded calendar month"
    );

    Ok(CalendarPage {
        grid,
        prev_month: prev_month_token(first),
        next_month,
        stored_events,
        upstream_events,
    })
}
