use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::StorageBackend,
    handlers::{
        covers::upload_cover,
        events::{create_event, delete_event, get_event, list_events, update_event},
        health::{livez, readyz},
        tracks::{create_upload_url, upload_track},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Event routes
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/create-event", post(create_event))
        // Track routes
        .route(
            "/upload-track",
            post(upload_track).layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        .route("/upload-track-url", post(create_upload_url))
        .route(
            "/upload-cover",
            post(upload_cover).layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
        )
        .layer(cors);

    let mut app = Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes);

    // Local blobs are served back from disk
    if state.config.storage_backend == StorageBackend::Local {
        app = app.nest_service("/files", ServeDir::new(&state.config.local_storage_dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout(),
        ))
        .with_state(state)
}
