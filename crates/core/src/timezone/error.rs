use thiserror::Error;

/// Errors raised while converting or normalizing date strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimezoneError {
    #[error("{label} is required.")]
    Required { label: String },
    #[error("{label} must be a valid date.")]
    InvalidDate { label: String },
}

impl TimezoneError {
    pub(crate) fn required(label: &str) -> Self {
        Self::Required {
            label: label.to_string(),
        }
    }

    pub(crate) fn invalid_date(label: &str) -> Self {
        Self::InvalidDate {
            label: label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_error_display() {
        assert_eq!(
            TimezoneError::required("Start time").to_string(),
            "Start time is required."
        );
        assert_eq!(
            TimezoneError::invalid_date("end_time_utc").to_string(),
            "end_time_utc must be a valid date."
        );
    }
}
