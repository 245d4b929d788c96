//! Output formatting functions.

pub mod pretty;

use crate::cli::OutputFormat;

/// Format a value for machine consumption.
///
/// JSON output is a single line so it can be redirected into a `--tracks`
/// file or piped to other tools.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}
