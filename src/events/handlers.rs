use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

use super::dto::{CreateEventRequest, DeletedResponse, ReplaceBudgetRequest, ReplaceGuestsRequest};
use super::repo::NewEvent;
use super::repo_types::Event;
use super::services;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/:id", put(replace_guests).delete(delete_event))
        .route("/events/:id/guests", put(replace_guests))
        .route("/events/:id/budget", put(replace_budget))
}

#[instrument(skip(state, payload))]
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let existing = Event::count(&state.db).await?;
    services::ensure_quota(existing)?;

    // The date is compared once, here at write time, and never re-checked.
    services::validate_new_event(&payload, OffsetDateTime::now_utc())?;

    let event = Event::create(
        &state.db,
        NewEvent {
            name: payload.name.trim(),
            date: payload.date,
            time: &payload.time,
            location: payload.location.trim(),
            description: payload.description.as_deref(),
            guests: &payload.guests,
        },
    )
    .await?;

    info!(event_id = %event.id, "event created");
    Ok((StatusCode::CREATED, Json(event)))
}

#[instrument(skip(state))]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    let events = Event::list(&state.db).await?;
    Ok(Json(events))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    let event = Event::find_by_id(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;
    Ok(Json(event))
}

/// Full replace of the guest collection, as one document write.
#[instrument(skip(state, payload))]
pub async fn replace_guests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceGuestsRequest>,
) -> Result<Json<Event>, ApiError> {
    // An absent field is a caller error; an explicit [] clears the list.
    let guests = payload.guests.ok_or_else(|| {
        ApiError::validation("guests", "guest data is required for the update")
    })?;
    services::validate_guests(&guests)?;

    let event = Event::replace_guests(&state.db, id, &guests)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    info!(event_id = %event.id, guests = event.guests.0.len(), "guest list replaced");
    Ok(Json(event))
}

/// Full replace of budget total and expense collection together. The sum of
/// expenses is not checked against the budget; the budget is a user-set
/// ceiling, the expenses are actuals.
#[instrument(skip(state, payload))]
pub async fn replace_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplaceBudgetRequest>,
) -> Result<Json<Event>, ApiError> {
    let event = Event::replace_budget(&state.db, id, payload.budget, &payload.expenses)
        .await?
        .ok_or(ApiError::NotFound("Event"))?;

    info!(event_id = %event.id, budget = event.budget, "budget replaced");
    Ok(Json(event))
}

#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = Event::delete(&state.db, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Event"));
    }

    info!(event_id = %id, "event deleted");
    Ok(Json(DeletedResponse {
        msg: "Event deleted".into(),
    }))
}
