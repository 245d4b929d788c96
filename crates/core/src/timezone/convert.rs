use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

use super::error::TimezoneError;
use super::LOCAL_OFFSET_MINUTES;

/// Formats with an explicit offset that RFC 3339 parsing does not cover.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Offset-less formats, read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns the venue's fixed UTC offset.
///
/// # Panics
/// Never in practice: [`LOCAL_OFFSET_MINUTES`] is well inside the ±24h range.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(LOCAL_OFFSET_MINUTES * 60).expect("local offset within ±24h")
}

/// Renders an instant in canonical UTC form: `YYYY-MM-DDTHH:MM:SS+00:00`.
///
/// Fractional seconds are truncated.
pub fn format_utc_with_offset(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}

/// Converts local wall-clock input (`YYYY-MM-DDTHH:MM[:SS[.mmm]]` at UTC+05:30)
/// to canonical UTC form.
///
/// Out-of-range components are an error, never carried into the next field.
///
/// ```
/// use mixmaster_core::timezone::convert_local_input_to_utc;
///
/// let utc = convert_local_input_to_utc("2024-01-01T10:00", "Start time").unwrap();
/// assert_eq!(utc, "2024-01-01T04:30:00+00:00");
/// ```
pub fn convert_local_input_to_utc(raw: &str, label: &str) -> Result<String, TimezoneError> {
    if raw.trim().is_empty() {
        return Err(TimezoneError::required(label));
    }

    let local = parse_local_wall_clock(raw).ok_or_else(|| TimezoneError::invalid_date(label))?;
    let utc = local
        .checked_sub_signed(Duration::minutes(i64::from(LOCAL_OFFSET_MINUTES)))
        .ok_or_else(|| TimezoneError::invalid_date(label))?;

    Ok(format_utc_with_offset(Utc.from_utc_datetime(&utc)))
}

/// Parses any instant the generic parser understands.
///
/// Accepted: RFC 3339, the same with a space separator or without seconds,
/// RFC 2822, offset-less date-times (read as UTC), and bare dates (UTC midnight).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(parsed) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(parsed.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Parses a JSON value that must be a non-empty date string.
pub fn parse_utc_date_value(value: &Value, field: &str) -> Result<DateTime<Utc>, TimezoneError> {
    match value {
        Value::String(raw) => parse_date_str(raw, field),
        _ => Err(TimezoneError::required(field)),
    }
}

/// Normalizes a JSON date value to canonical UTC form.
pub fn normalize_utc_date_string(value: &Value, field: &str) -> Result<String, TimezoneError> {
    parse_utc_date_value(value, field).map(format_utc_with_offset)
}

/// Normalizes a date string to canonical UTC form.
pub fn normalize_utc_date_str(value: &str, field: &str) -> Result<String, TimezoneError> {
    parse_date_str(value, field).map(format_utc_with_offset)
}

/// Maps a stored instant back to local wall-clock input (`YYYY-MM-DDTHH:MM`).
///
/// Returns an empty string when the value cannot be parsed.
pub fn to_local_display_input_value(iso: &str) -> String {
    parse_instant(iso)
        .map(|instant| {
            instant
                .with_timezone(&local_offset())
                .format("%Y-%m-%dT%H:%M")
                .to_string()
        })
        .unwrap_or_default()
}

/// Formats a stored instant for display in the venue's zone, e.g.
/// `Jan 1, 2024, 10:00 AM`.
///
/// Returns the input unchanged when it cannot be parsed.
pub fn format_local_display(iso: &str) -> String {
    match parse_instant(iso) {
        Some(instant) => instant
            .with_timezone(&local_offset())
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string(),
        None => iso.to_string(),
    }
}

fn parse_date_str(raw: &str, field: &str) -> Result<DateTime<Utc>, TimezoneError> {
    if raw.trim().is_empty() {
        return Err(TimezoneError::required(field));
    }
    parse_instant(raw).ok_or_else(|| TimezoneError::invalid_date(field))
}

fn parse_local_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    let (date_part, time_part) = raw.trim().split_once('T')?;

    let mut date = date_part.split('-');
    let year = i32::try_from(parse_component(date.next()?)?).ok()?;
    let month = parse_component(date.next()?)?;
    let day = parse_component(date.next()?)?;

    let mut time = time_part.split(':');
    let hour = parse_component(time.next()?)?;
    let minute = parse_component(time.next()?)?;
    let (second, millisecond) = match time.next() {
        Some(part) => parse_seconds(part)?,
        None => (0, 0),
    };

    if date.next().is_some() || time.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(hour, minute, second, millisecond)
}

fn parse_seconds(part: &str) -> Option<(u32, u32)> {
    let (seconds, fraction) = part.split_once('.').unwrap_or((part, ""));
    let seconds = parse_component(seconds)?;

    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Only millisecond precision is meaningful: ".5" is 500ms, ".12345" is 123ms.
    let padded = format!("{fraction:0<3}");
    let millisecond = padded[..3].parse().ok()?;

    Some((seconds, millisecond))
}

fn parse_component(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_local_input_to_utc() {
        assert_eq!(
            convert_local_input_to_utc("2024-01-01T10:00", "Start time").unwrap(),
            "2024-01-01T04:30:00+00:00"
        );
    }

    #[test]
    fn test_convert_local_input_rolls_back_a_day() {
        assert_eq!(
            convert_local_input_to_utc("2024-01-01T02:00", "Start time").unwrap(),
            "2023-12-31T20:30:00+00:00"
        );
    }

    #[test]
    fn test_convert_local_input_with_seconds_and_millis() {
        assert_eq!(
            convert_local_input_to_utc("2024-03-10T18:45:30.999", "End time").unwrap(),
            "2024-03-10T13:15:30+00:00"
        );
        assert_eq!(
            convert_local_input_to_utc("2024-03-10T18:45:30.5", "End time").unwrap(),
            "2024-03-10T13:15:30+00:00"
        );
    }

    #[test]
    fn test_convert_local_input_empty() {
        assert_eq!(
            convert_local_input_to_utc("", "Start time"),
            Err(TimezoneError::Required {
                label: "Start time".to_string()
            })
        );
        assert_eq!(
            convert_local_input_to_utc("   ", "Start time").unwrap_err().to_string(),
            "Start time is required."
        );
    }

    #[test]
    fn test_convert_local_input_invalid() {
        for raw in [
            "2024-01-01",
            "2024-01-01T10",
            "2024-aa-01T10:00",
            "2024-01-01T10:xx",
            "2024-02-30T10:00",
            "2024-01-32T10:00",
            "2024-13-01T10:00",
            "2023-02-29T10:00",
            "2024-01-01T24:00",
            "2024-01-01T10:60",
            "2024-01-01T25:00",
            "2024-01-01T10:00:00.12a",
        ] {
            assert_eq!(
                convert_local_input_to_utc(raw, "Start time")
                    .unwrap_err()
                    .to_string(),
                "Start time must be a valid date.",
                "input: {raw}"
            );
        }
    }

    #[test]
    fn test_format_utc_with_offset_truncates_fraction() {
        let instant = DateTime::parse_from_rfc3339("2024-05-01T12:34:56.789Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_utc_with_offset(instant), "2024-05-01T12:34:56+00:00");
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 4, 30, 0).unwrap();

        assert_eq!(parse_instant("2024-01-01T04:30:00Z"), Some(expected));
        assert_eq!(parse_instant("2024-01-01T04:30:00+00:00"), Some(expected));
        assert_eq!(parse_instant("2024-01-01T10:00:00+05:30"), Some(expected));
        assert_eq!(parse_instant("2024-01-01T04:30:00.000Z"), Some(expected));
        assert_eq!(parse_instant("2024-01-01 04:30:00+00:00"), Some(expected));
        assert_eq!(parse_instant("2024-01-01T10:00+05:30"), Some(expected));
        assert_eq!(
            parse_instant("Mon, 01 Jan 2024 04:30:00 +0000"),
            Some(expected)
        );
        assert_eq!(parse_instant("2024-01-01T04:30:00"), Some(expected));
        assert_eq!(parse_instant("2024-01-01T04:30"), Some(expected));
        assert_eq!(
            parse_instant("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("tomorrow"), None);
        assert_eq!(parse_instant("2024-13-01T00:00:00Z"), None);
    }

    #[test]
    fn test_normalize_utc_date_string() {
        assert_eq!(
            normalize_utc_date_string(&json!("2024-01-01T10:00:00+05:30"), "start_time_utc")
                .unwrap(),
            "2024-01-01T04:30:00+00:00"
        );
        assert_eq!(
            normalize_utc_date_str("2024-06-15T20:00:00.250Z", "end_time_utc").unwrap(),
            "2024-06-15T20:00:00+00:00"
        );
    }

    #[test]
    fn test_normalize_utc_date_string_errors() {
        assert_eq!(
            normalize_utc_date_string(&json!(null), "start_time_utc")
                .unwrap_err()
                .to_string(),
            "start_time_utc is required."
        );
        assert_eq!(
            normalize_utc_date_string(&json!(1_704_067_200), "start_time_utc")
                .unwrap_err()
                .to_string(),
            "start_time_utc is required."
        );
        assert_eq!(
            normalize_utc_date_string(&json!("  "), "start_time_utc")
                .unwrap_err()
                .to_string(),
            "start_time_utc is required."
        );
        assert_eq!(
            normalize_utc_date_string(&json!("not a date"), "end_time_utc")
                .unwrap_err()
                .to_string(),
            "end_time_utc must be a valid date."
        );
    }

    #[test]
    fn test_to_local_display_input_value() {
        assert_eq!(
            to_local_display_input_value("2024-01-01T04:30:00+00:00"),
            "2024-01-01T10:00"
        );
        assert_eq!(
            to_local_display_input_value("2023-12-31T20:30:00+00:00"),
            "2024-01-01T02:00"
        );
        assert_eq!(to_local_display_input_value("garbage"), "");
    }

    #[test]
    fn test_local_round_trip() {
        let utc = convert_local_input_to_utc("2024-07-19T23:15", "Start time").unwrap();
        assert_eq!(to_local_display_input_value(&utc), "2024-07-19T23:15");
    }

    #[test]
    fn test_format_local_display() {
        assert_eq!(
            format_local_display("2024-01-01T04:30:00+00:00"),
            "Jan 1, 2024, 10:00 AM"
        );
        assert_eq!(
            format_local_display("2024-08-15T13:00:00+00:00"),
            "Aug 15, 2024, 6:30 PM"
        );
        assert_eq!(format_local_display("not a date"), "not a date");
    }
}
