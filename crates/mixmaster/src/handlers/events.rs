//! Event CRUD handlers.
//!
//! Each mutation reads the whole events document, applies the change in
//! memory and writes the document back.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::Utc;

use mixmaster_core::event::{
    conflict_message, find_overlapping_event, orphaned_media_urls, select_events,
    validate_event_input, DeletedEventResponse, EventListResponse, EventPayload, EventRecord,
    EventResponse, ListEventsQuery, NewEvent, ValidationError,
};

use crate::{handlers::ApiError, state::AppState};

/// List events (GET /api/events).
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> Result<Json<EventListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Rejected {
        status: StatusCode::BAD_REQUEST,
        message: e.body_text(),
    })?;

    let events = state.events.read_events().await.map_err(ApiError::LoadEvents)?;
    let events = select_events(events, &query, Utc::now());

    Ok(Json(EventListResponse { events }))
}

/// Get a single event by ID (GET /api/events/{id}).
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EventResponse>, ApiError> {
    let events = state.events.read_events().await.map_err(ApiError::LoadEvents)?;

    events
        .into_iter()
        .find(|event| event.event_id == id)
        .map(|event| Json(EventResponse { event }))
        .ok_or(ApiError::EventNotFound(id))
}

/// Create a new event (POST /api/create-event, POST /api/events).
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let new_event = validate_payload(payload)?;

    let mut events = state.events.read_events().await.map_err(ApiError::LoadEvents)?;
    ensure_no_overlap(&events, &new_event, None)?;

    let event = new_event.into_record_with_new_id();
    events.push(event.clone());
    state
        .events
        .persist_events(&events)
        .await
        .map_err(ApiError::SaveEvents)?;

    tracing::info!(
        event_id = %event.event_id,
        event_name = %event.event_name,
        tracks = event.tracks.len(),
        "Created event"
    );

    Ok((StatusCode::CREATED, Json(EventResponse { event })))
}

/// Replace an event by ID (PUT /api/events/{id}).
///
/// Position and id are kept. Track and cover objects that no stored event
/// references any more are deleted after the document is saved.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<Json<EventResponse>, ApiError> {
    let new_event = validate_payload(payload)?;

    let mut events = state.events.read_events().await.map_err(ApiError::LoadEvents)?;
    let index = events
        .iter()
        .position(|event| event.event_id == id)
        .ok_or_else(|| ApiError::EventNotFound(id.clone()))?;
    ensure_no_overlap(&events, &new_event, Some(&id))?;

    let event = new_event.into_record(id);
    let previous = std::mem::replace(&mut events[index], event.clone());
    state
        .events
        .persist_events(&events)
        .await
        .map_err(ApiError::SaveEvents)?;

    tracing::info!(event_id = %event.event_id, "Updated event");

    let orphaned = orphaned_media_urls(&previous, &events);
    remove_media_objects(&state, &event.event_id, orphaned).await;

    Ok(Json(EventResponse { event }))
}

/// Delete an event by ID (DELETE /api/events/{id}).
///
/// Also deletes the event's track and cover objects unless another event
/// still references them.
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedEventResponse>, ApiError> {
    let mut events = state.events.read_events().await.map_err(ApiError::LoadEvents)?;
    let index = events
        .iter()
        .position(|event| event.event_id == id)
        .ok_or_else(|| ApiError::EventNotFound(id.clone()))?;

    let removed = events.remove(index);
    state
        .events
        .persist_events(&events)
        .await
        .map_err(ApiError::SaveEvents)?;

    tracing::info!(event_id = %id, "Deleted event");

    let orphaned = orphaned_media_urls(&removed, &events);
    remove_media_objects(&state, &id, orphaned).await;

    Ok(Json(DeletedEventResponse { deleted: id }))
}

fn validate_payload(
    payload: Result<Json<EventPayload>, JsonRejection>,
) -> Result<NewEvent, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Rejected event payload");
        ValidationError::InvalidPayload
    })?;

    Ok(validate_event_input(&payload)?)
}

fn ensure_no_overlap(
    events: &[EventRecord],
    candidate: &NewEvent,
    exclude_id: Option<&str>,
) -> Result<(), ApiError> {
    match find_overlapping_event(
        events,
        &candidate.start_time_utc,
        &candidate.end_time_utc,
        exclude_id,
    ) {
        Some(existing) => Err(ApiError::Conflict {
            message: conflict_message(existing),
            conflicting_event_id: existing.event_id.clone(),
        }),
        None => Ok(()),
    }
}

/// Best-effort cleanup; the event change is already saved.
async fn remove_media_objects(state: &AppState, event_id: &str, urls: Vec<String>) {
    if urls.is_empty() {
        return;
    }

    if let Err(e) = state.events.delete_objects_by_url(&urls).await {
        tracing::warn!(
            event_id = %event_id,
            error = %e,
            "Failed to delete media objects"
        );
    }
}
