//! Conversion between the venue's fixed local offset and canonical UTC strings.
//!
//! Stored timestamps use the canonical form `YYYY-MM-DDTHH:MM:SS+00:00`:
//! second precision with an explicit `+00:00` suffix, never `Z`.
//!
//! Two conventions exist side by side:
//!
//! - [`convert_local_input_to_utc`] reads operator wall-clock input at UTC+05:30.
//!   Only the operator-facing edge (the CLI client) uses it. Components must
//!   name a real calendar date and time: `2024-01-32T10:00` or `T24:00` is
//!   rejected rather than rolled over into the next day or month.
//! - [`normalize_utc_date_string`] accepts any instant the generic parser
//!   understands. The HTTP API uses it and therefore expects instants that are
//!   already in UTC or carry an explicit offset.

mod convert;
mod error;

pub use convert::{
    convert_local_input_to_utc, format_local_display, format_utc_with_offset,
    local_offset, normalize_utc_date_str, normalize_utc_date_string, parse_instant,
    parse_utc_date_value, to_local_display_input_value,
};
pub use error::TimezoneError;

/// Offset of the venue's wall clock from UTC, in minutes.
pub const LOCAL_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// IANA name of the venue's time zone (fixed offset, no daylight saving).
pub const LOCAL_TIMEZONE_NAME: &str = "Asia/Colombo";
