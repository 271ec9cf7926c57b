use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use calendar_shared::{Event, EventForm, FormErrors};
use uuid::Uuid;

use crate::error::{ApiResult, AppError};
use crate::state::AppState;
use crate::store::EventStore;
use crate::views;

const CALENDAR_PATH: &str = "/calendar/";

pub async fn new_event_form() -> Html<String> {
    render_form(&EventForm::default(), &FormErrors::default(), None)
}

pub async fn edit_event_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Html<String>> {
    let event = find_event(state.store.as_ref(), id).await?;
    Ok(render_form(
        &EventForm::from_event(&event),
        &FormErrors::default(),
        Some(id),
    ))
}

pub async fn submit_new_event(
    State(state): State<AppState>,
    Form(form): Form<EventForm>,
) -> ApiResult<Response> {
    submit(state.store.as_ref(), None, form).await
}

pub async fn submit_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<EventForm>,
) -> ApiResult<Response> {
    find_event(state.store.as_ref(), id).await?;
    submit(state.store.as_ref(), Some(id), form).await
}

async fn submit(store: &dyn EventStore, id: Option<Uuid>, form: EventForm) -> ApiResult<Response> {
    match create_or_update(store, id, &form).await? {
        Ok(event) => {
            tracing::info!(id = %event.id, title = %event.title, "Saved event");
            Ok(Redirect::to(CALENDAR_PATH).into_response())
        }
        Err(errors) => Ok(render_form(&form, &errors, id).into_response()),
    }
}

/// Validate a submitted form and store it as a new event or over event `id`.
///
/// The inner `Err` carries field errors for re-rendering the form.
pub async fn create_or_update(
    store: &dyn EventStore,
    id: Option<Uuid>,
    form: &EventForm,
) -> ApiResult<Result<Event, FormErrors>> {
    let new = match form.clean() {
        Ok(new) => new,
        Err(errors) => return Ok(Err(errors)),
    };

    let event = match id {
        Some(id) => store
            .update_event(id, new)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Event {id}")))?,
        None => store.create_event(new).await?,
    };

    Ok(Ok(event))
}

async fn find_event(store: &dyn EventStore, id: Uuid) -> ApiResult<Event> {
    store
        .get_event(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {id}")))
}

fn render_form(form: &EventForm, errors: &FormErrors, id: Option<Uuid>) -> Html<String> {
    Html(views::event_form_page(form, errors, id).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEventStore;

    fn valid_form(title: &str) -> EventForm {
        EventForm {
            title: title.to_string(),
            start_time: "2024-03-01T10:00".to_string(),
            end_time: "2024-03-01T11:00".to_string(),
            description: "Quarterly".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let store = MemoryEventStore::new();

        let created = create_or_update(&store, None, &valid_form("Review"))
            .await
            .unwrap()
            .unwrap();
        let updated = create_or_update(&store, Some(created.id), &valid_form("Final review"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(
            store.get_event(created.id).await.unwrap().unwrap().title,
            "Final review"
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_stored() {
        let store = MemoryEventStore::new();
        let mut form = valid_form("Review");
        form.end_time = "2024-03-01T09:00".to_string();

        let errors = create_or_update(&store, None, &form)
            .await
            .unwrap()
            .unwrap_err();
        assert!(errors.has("end_time"));
    }

    #[tokio::test]
    async fn test_update_of_unknown_event() {
        let store = MemoryEventStore::new();
        let result = create_or_update(&store, Some(Uuid::new_v4()), &valid_form("Ghost")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
