//! Event API operations.

use mixmaster_core::event::{
    DeletedEventResponse, EventListResponse, EventPayload, EventRecord, EventResponse,
    ListEventsQuery,
};

use super::MixmasterClient;
use crate::error::Result;

impl MixmasterClient {
    /// List events.
    pub async fn list_events(&self, query: ListEventsQuery) -> Result<Vec<EventRecord>> {
        let response = self
            .client
            .get(self.url("/api/events"))
            .query(&query)
            .send()
            .await?;
        let body: EventListResponse = self.handle_response(response).await?;
        Ok(body.events)
    }

    /// Get event by ID.
    pub async fn get_event(&self, id: &str) -> Result<EventRecord> {
        let response = self
            .client
            .get(self.url(&format!("/api/events/{}", id)))
            .send()
            .await?;
        let body: EventResponse = self.handle_response(response).await?;
        Ok(body.event)
    }

    /// Create a new event.
    pub async fn create_event(&self, payload: &EventPayload) -> Result<EventRecord> {
        let response = self
            .client
            .post(self.url("/api/create-event"))
            .json(payload)
            .send()
            .await?;
        let body: EventResponse = self.handle_response(response).await?;
        Ok(body.event)
    }

    /// Replace an event.
    pub async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<EventRecord> {
        let response = self
            .client
            .put(self.url(&format!("/api/events/{}", id)))
            .json(payload)
            .send()
            .await?;
        let body: EventResponse = self.handle_response(response).await?;
        Ok(body.event)
    }

    /// Delete event by ID, returning the deleted ID.
    pub async fn delete_event(&self, id: &str) -> Result<String> {
        let response = self
            .client
            .delete(self.url(&format!("/api/events/{}", id)))
            .send()
            .await?;
        let body: DeletedEventResponse = self.handle_response(response).await?;
        Ok(body.deleted)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        routing::get,
        Json, Router,
    };
    use mixmaster_core::event::{ErrorResponse, EventSort, NewEvent, TrackRecord};
    use serde_json::json;

    use super::*;
    use crate::client::tests::spawn_server;
    use crate::error::ClientError;

    fn sample_event(id: &str) -> EventRecord {
        NewEvent {
            event_name: "Sunset Session".to_string(),
            artist_name: "DJ Nila".to_string(),
            start_time_utc: "2024-01-01T04:30:00+00:00".to_string(),
            end_time_utc: "2024-01-01T06:30:00+00:00".to_string(),
            tracks: vec![TrackRecord::new("t-1", "Opening", "https://cdn/t-1.mp3", 245)],
            cover_image_url: None,
        }
        .into_record(id)
    }

    #[tokio::test]
    async fn test_list_events_sends_query() {
        let app = Router::new().route(
            "/api/events",
            get(|Query(query): Query<ListEventsQuery>| async move {
                assert!(query.upcoming);
                assert_eq!(query.sort, EventSort::Start);
                Json(EventListResponse {
                    events: vec![sample_event("evt-1")],
                })
            }),
        );
        let client = MixmasterClient::new(spawn_server(app).await);

        let events = client
            .list_events(ListEventsQuery::new().upcoming_only().sorted_by_start())
            .await
            .unwrap();

        assert_eq!(events, vec![sample_event("evt-1")]);
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let app = Router::new().route(
            "/api/events/{id}",
            get(|Path(_id): Path<String>| async {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Event not found.")))
            }),
        );
        let client = MixmasterClient::new(spawn_server(app).await);

        let error = client.get_event("missing").await.unwrap_err();
        assert!(matches!(
            error,
            ClientError::NotFound { ref resource } if resource == "/api/events/missing"
        ));
    }

    #[tokio::test]
    async fn test_create_event_conflict() {
        let app = Router::new().route(
            "/api/create-event",
            axum::routing::post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["event_name"], "Clash");
                (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "Event overlaps with \"Sunset Session\"",
                        "conflicting_event_id": "evt-1"
                    })),
                )
            }),
        );
        let client = MixmasterClient::new(spawn_server(app).await);
        let payload = EventPayload::new("Clash", "DJ", "2024-01-01T05:00:00Z", "2024-01-01T06:00:00Z", &[]);

        let error = client.create_event(&payload).await.unwrap_err();
        match error {
            ClientError::ServerError {
                status,
                conflicting_event_id,
                ..
            } => {
                assert_eq!(status, 409);
                assert_eq!(conflicting_event_id.as_deref(), Some("evt-1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_event() {
        let app = Router::new().route(
            "/api/events/{id}",
            axum::routing::delete(|Path(id): Path<String>| async move {
                Json(DeletedEventResponse { deleted: id })
            }),
        );
        let client = MixmasterClient::new(spawn_server(app).await);

        assert_eq!(client.delete_event("evt-9").await.unwrap(), "evt-9");
    }
}
