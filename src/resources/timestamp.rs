//! ISO-8601 timestamps in a lexically sortable form
//!
//! Every timestamp stored on a resource is UTC with millisecond precision and
//! a `Z` suffix, e.g. `2024-05-01T10:00:00.000Z`. With a fixed width, string
//! order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time, normalized
pub fn now() -> String {
    format(Utc::now())
}

pub fn format(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp in any offset and normalize it
pub fn normalize(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|at| format(at.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_converts_offset_to_utc() {
        assert_eq!(
            normalize("2024-05-01T12:00:00+02:00").as_deref(),
            Some("2024-05-01T10:00:00.000Z")
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize("yesterday").is_none());
        assert!(normalize("").is_none());
    }

    #[test]
    fn test_normalized_strings_sort_chronologically() {
        let earlier = normalize("2024-05-01T09:59:59.5Z").unwrap();
        let later = normalize("2024-05-01T12:00:00+01:00").unwrap();
        assert!(earlier < later);
    }
}
