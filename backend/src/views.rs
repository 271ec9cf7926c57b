//! Server-rendered HTML pages.

use std::collections::BTreeMap;

use calendar_shared::api::CalendarPage;
use calendar_shared::{CalendarCell, Event, EventForm, FetchedEvent, FormErrors};
use chrono::{Datelike, NaiveDate};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use uuid::Uuid;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const CSS: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
table.calendar { border-collapse: collapse; width: 100%; table-layout: fixed; }
table.calendar th, table.calendar td { border: 1px solid #ccc; vertical-align: top; padding: 4px; }
table.calendar td { height: 6rem; }
td.noday { background: #f5f5f5; }
span.date { font-weight: bold; }
ul { padding-left: 1rem; margin: 0; }
li.upstream { color: #555; }
nav a { margin-right: 1rem; }
.errorlist { color: #b00; }
"#;

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body { (body) }
        }
    }
}

pub fn calendar_page(page: &CalendarPage) -> Markup {
    let mut stored: BTreeMap<NaiveDate, Vec<&Event>> = BTreeMap::new();
    for event in &page.stored_events {
        stored.entry(event.date()).or_default().push(event);
    }

    let shown = page.grid.token();
    let heading = shown
        .first_day()
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| shown.to_string());

    layout(
        &heading,
        html! {
            nav {
                @if page.prev_month != shown {
                    a.previous href={ "/calendar/?month=" (page.prev_month) } { "Previous Month" }
                }
                @if page.next_month != shown {
                    a.next href={ "/calendar/?month=" (page.next_month) } { "Next Month" }
                }
                a.new href="/event/" { "New Event" }
            }
            table.calendar {
                tr { th.month colspan="7" { (heading) } }
                tr {
                    @for weekday in WEEKDAYS {
                        th.weekday { (weekday) }
                    }
                }
                @for week in &page.grid.weeks {
                    tr {
                        @for cell in week {
                            @match cell {
                                CalendarCell::Empty => {
                                    td.noday {}
                                },
                                CalendarCell::Day(date) => {
                                    (day_cell(
                                        *date,
                                        stored.get(date).map(Vec::as_slice).unwrap_or_default(),
                                        page.upstream_events.get(date).map(Vec::as_slice).unwrap_or_default(),
                                    ))
                                },
                            }
                        }
                    }
                }
            }
        },
    )
}

fn day_cell(date: NaiveDate, stored: &[&Event], upstream: &[FetchedEvent]) -> Markup {
    html! {
        td.day data-date=(date) {
            span.date { (date.day()) }
            @if !stored.is_empty() || !upstream.is_empty() {
                ul {
                    @for event in stored {
                        li.stored {
                            a href={ "/event/" (event.id) "/" } { (event.title) }
                        }
                    }
                    @for event in upstream {
                        li.upstream title=(event.short_description) {
                            (event.start_time.format("%H:%M")) " " (event.name)
                        }
                    }
                }
            }
        }
    }
}

pub fn event_form_page(form: &EventForm, errors: &FormErrors, event_id: Option<Uuid>) -> Markup {
    let (heading, action) = match event_id {
        Some(id) => ("Edit Event".to_string(), format!("/event/{id}/")),
        None => ("New Event".to_string(), "/event/".to_string()),
    };

    layout(
        &heading,
        html! {
            nav { a href="/calendar/" { "Calendar" } }
            h1 { (heading) }
            form method="post" action=(action) {
                (field("title", "Title", errors, html! {
                    input #title type="text" name="title" maxlength="200" value=(form.title);
                }))
                (field("start_time", "Start time", errors, html! {
                    input #start_time type="datetime-local" name="start_time" value=(form.start_time);
                }))
                (field("end_time", "End time", errors, html! {
                    input #end_time type="datetime-local" name="end_time" value=(form.end_time);
                }))
                (field("description", "Description", errors, html! {
                    textarea #description name="description" { (form.description) }
                }))
                button type="submit" { "Submit" }
            }
        },
    )
}

fn field(name: &str, label: &str, errors: &FormErrors, input: Markup) -> Markup {
    html! {
        p {
            label for=(name) { (label) }
            (input)
            @let messages = errors.get(name);
            @if !messages.is_empty() {
                ul.errorlist {
                    @for message in messages {
                        li { (message) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calendar_shared::{build_month_grid, MonthToken};
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_calendar_page_places_events_on_their_day() {
        let stored = Event {
            id: Uuid::nil(),
            title: "Dentist <3".to_string(),
            start_time: at(5, 9),
            end_time: at(5, 10),
            description: String::new(),
        };
        let upstream = FetchedEvent {
            name: "Launch".to_string(),
            start_time: at(6, 12),
            duration: 1,
            short_description: "Go live".to_string(),
            extra: Default::default(),
        };
        let page = CalendarPage {
            grid: build_month_grid(2024, 3).unwrap(),
            prev_month: MonthToken::new(2024, 2).unwrap(),
            next_month: MonthToken::new(2024, 4).unwrap(),
            stored_events: vec![stored],
            upstream_events: BTreeMap::from([(at(6, 0).date(), vec![upstream])]),
        };

        let html = calendar_page(&page).into_string();
        assert!(html.contains("March 2024"));
        assert!(html.contains(r#"href="/calendar/?month=2024-2""#));
        assert!(html.contains(r#"href="/calendar/?month=2024-4""#));
        assert!(html.contains("Dentist &lt;3"));
        assert!(html.contains(&format!(r#"href="/event/{}/""#, Uuid::nil())));
        assert!(html.contains("12:00 Launch"));
        assert_eq!(html.matches(r#"class="noday""#).count(), 4);
        assert_eq!(html.matches(r#"class="day""#).count(), 31);
    }

    #[test]
    fn test_calendar_page_hides_links_past_last_year() {
        let page = CalendarPage {
            grid: build_month_grid(9999, 12).unwrap(),
            prev_month: MonthToken::new(9999, 11).unwrap(),
            next_month: MonthToken::new(9999, 12).unwrap(),
            stored_events: Vec::new(),
            upstream_events: BTreeMap::new(),
        };

        let html = calendar_page(&page).into_string();
        assert!(html.contains("Previous Month"));
        assert!(!html.contains("Next Month"));
    }

    #[test]
    fn test_form_page_shows_errors_and_values() {
        let form = EventForm {
            title: "Review".to_string(),
            ..Default::default()
        };
        let errors = form.clean().unwrap_err();

        let html = event_form_page(&form, &errors, None).into_string();
        assert!(html.contains(r#"action="/event/""#));
        assert!(html.contains(r#"value="Review""#));
        assert_eq!(html.matches("This field is required.").count(), 3);
    }

    #[test]
    fn test_edit_form_posts_to_event_url() {
        let id = Uuid::new_v4();
        let html = event_form_page(&EventForm::default(), &FormErrors::default(), Some(id)).into_string();
        assert!(html.contains(&format!(r#"action="/event/{id}/""#)));
        assert!(html.contains("Edit Event"));
        assert!(!html.contains(r#"class="errorlist""#));
    }
}
