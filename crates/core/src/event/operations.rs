//! Pure scheduling operations over event collections.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::requests::{EventSort, ListEventsQuery};
use super::types::EventRecord;
use crate::timezone::{format_local_display, parse_instant};

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` share an instant.
///
/// Back-to-back intervals (`e1 == s2`) do not overlap.
pub fn intervals_overlap(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    other_start: DateTime<Utc>,
    other_end: DateTime<Utc>,
) -> bool {
    start < other_end && end > other_start
}

/// Returns the first event, in collection order, whose window overlaps
/// `[start, end)`.
///
/// The event whose id equals `exclude_id` is skipped so an update is never
/// reported as conflicting with itself. Events with unreadable timestamps never
/// conflict, and neither does an unreadable candidate window.
///
/// # Examples
///
/// ```
/// use mixmaster_core::event::{find_overlapping_event, EventRecord};
///
/// let events: Vec<EventRecord> = Vec::new();
/// assert!(find_overlapping_event(
///     &events,
///     "2024-01-01T04:30:00+00:00",
///     "2024-01-01T06:30:00+00:00",
///     None,
/// )
/// .is_none());
/// ```
pub fn find_overlapping_event<'a>(
    events: &'a [EventRecord],
    start: &str,
    end: &str,
    exclude_id: Option<&str>,
) -> Option<&'a EventRecord> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let exclude_id = exclude_id.filter(|id| !id.is_empty());

    events.iter().find(|event| {
        if exclude_id == Some(event.event_id.as_str()) {
            return false;
        }
        match (event.starts_at(), event.ends_at()) {
            (Some(existing_start), Some(existing_end)) => {
                intervals_overlap(start, end, existing_start, existing_end)
            }
            _ => false,
        }
    })
}

/// True when the event's end time is at or before `now`.
pub fn is_event_expired(event: &EventRecord, now: DateTime<Utc>) -> bool {
    event.ends_at().is_some_and(|end| end <= now)
}

/// Applies list filters and ordering.
///
/// Sorting is stable; events with unreadable start times go last.
pub fn select_events(
    events: Vec<EventRecord>,
    query: &ListEventsQuery,
    now: DateTime<Utc>,
) -> Vec<EventRecord> {
    let mut selected: Vec<EventRecord> = if query.upcoming {
        events
            .into_iter()
            .filter(|event| !is_event_expired(event, now))
            .collect()
    } else {
        events
    };

    if query.sort == EventSort::Start {
        selected.sort_by_key(|event| (event.starts_at().is_none(), event.starts_at()));
    }

    selected
}

/// Media URLs (tracks, then cover) of `previous` that no event in
/// `remaining` references any more.
///
/// `remaining` is the collection as it will be persisted: after the update
/// replaced `previous`, or after the delete removed it. Order follows
/// `previous`; duplicates are reported once.
pub fn orphaned_media_urls(previous: &EventRecord, remaining: &[EventRecord]) -> Vec<String> {
    let kept: HashSet<&str> = remaining.iter().flat_map(|event| event.media_urls()).collect();
    let mut seen = HashSet::new();

    previous
        .media_urls()
        .filter(|url| !kept.contains(url) && seen.insert(*url))
        .map(str::to_string)
        .collect()
}

/// Human readable conflict message shown when a new window collides with
/// `existing`.
pub fn conflict_message(existing: &EventRecord) -> String {
    format!(
        "Event overlaps with \"{}\" by {} ({} to {}).",
        existing.event_name,
        existing.artist_name,
        format_local_display(&existing.start_time_utc),
        format_local_display(&existing.end_time_utc),
    )
}
