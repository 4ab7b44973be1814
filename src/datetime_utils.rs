use chrono::{DateTime, Utc};

/// Human-readable format for display: "2024-01-20 15:30:00"
const DISPLAY_FULL: &str = "%Y-%m-%d %H:%M:%S";

/// Convert Unix timestamp to DateTime
pub fn from_unix_timestamp(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_else(|| {
        // If the provided timestamp is invalid, return Unix epoch
        DateTime::from_timestamp(0, 0).expect("Unix epoch timestamp should always be valid")
    })
}

/// Format a datetime for human-readable display
pub fn format_for_display(datetime: &DateTime<Utc>) -> String {
    datetime.format(DISPLAY_FULL).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix_timestamp() {
        let dt = from_unix_timestamp(1_577_836_800);
        assert_eq!(format_for_display(&dt), "2020-01-01 00:00:00");
    }

    #[test]
    fn test_invalid_timestamp_falls_back_to_epoch() {
        let dt = from_unix_timestamp(i64::MAX);
        assert_eq!(format_for_display(&dt), "1970-01-01 00:00:00");
    }
}
