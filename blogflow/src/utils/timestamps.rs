//! Timestamp helpers for task ids and completion times.

use chrono::{DateTime, Utc};

/// Represents a timestamp that can be serialized/deserialized.
pub type Timestamp = DateTime<Utc>;

/// Prefix of synthesized task identifiers.
pub const TASK_ID_PREFIX: &str = "BLOG-";

/// Format of the numeric part of a synthesized task id (14 digits).
const TASK_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Formats a timestamp as ISO 8601 with microsecond precision.
///
/// # Examples
///
/// ```
/// use blogflow::utils::format_iso;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
/// assert_eq!(format_iso(&ts), "2024-05-01T09:30:00.000000+00:00");
/// ```
#[must_use]
pub fn format_iso(ts: &Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Returns the current UTC time as an ISO 8601 formatted string.
#[must_use]
pub fn iso_timestamp() -> String {
    format_iso(&Utc::now())
}

/// Builds a task id of the form `BLOG-YYYYMMDDHHMMSS`.
///
/// # Examples
///
/// ```
/// use blogflow::utils::synthesize_task_id;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 7).unwrap();
/// assert_eq!(synthesize_task_id(&ts), "BLOG-20240501093007");
/// ```
#[must_use]
pub fn synthesize_task_id(ts: &Timestamp) -> String {
    format!("{TASK_ID_PREFIX}{}", ts.format(TASK_ID_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso_timestamp_format() {
        let ts = iso_timestamp();
        assert!(ts.contains('T'));
        assert!(ts.ends_with("+00:00"));
    }

    #[test]
    fn test_task_id_has_fourteen_digits() {
        let ts = Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
        let id = synthesize_task_id(&ts);
        let digits = id.strip_prefix(TASK_ID_PREFIX).unwrap();
        assert_eq!(digits.len(), 14);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
