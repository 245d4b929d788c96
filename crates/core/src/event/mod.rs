mod error;
mod operations;
mod requests;
mod types;
mod validation;

pub use error::ValidationError;
pub use operations::{
    conflict_message, find_overlapping_event, intervals_overlap, is_event_expired,
    orphaned_media_urls, select_events,
};
pub use requests::{
    DeletedEventResponse, ErrorResponse, EventListResponse, EventPayload, EventResponse,
    EventSort, ListEventsQuery,
};
pub use types::{EventRecord, NewEvent, TrackRecord};
pub use validation::{validate_event_input, validate_tracks};
