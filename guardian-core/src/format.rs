//! Formatting helpers shared across UIs.

use chrono::{DateTime, Local, Utc};

/// Placeholder for a metric with no readings.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a timestamp as relative time (e.g., "2m ago").
pub fn format_relative_time(ts: DateTime<Utc>) -> String {
    format_relative_time_from(ts, Utc::now())
}

/// Format a timestamp relative to a fixed "now".
pub fn format_relative_time_from(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 0 {
        "just now".to_string()
    } else if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds())
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        ts.format("%b %d").to_string()
    }
}

/// Format a reading timestamp in local time for "Last updated" lines.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format an optional timestamp, or the N/A placeholder if missing.
pub fn format_timestamp_opt(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => format_timestamp(ts),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Short local date used for chart x-axis labels (e.g., "Oct 26").
pub fn format_chart_label(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time_from(now + Duration::seconds(5), now), "just now");
        assert_eq!(format_relative_time_from(now - Duration::seconds(30), now), "30s ago");
        assert_eq!(format_relative_time_from(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative_time_from(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative_time_from(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_relative_time_from(now - Duration::days(30), now), "Apr 20");
    }

    #[test]
    fn test_timestamp_placeholder() {
        assert_eq!(format_timestamp_opt(None), "N/A");
        let ts = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp_opt(Some(ts)), format_timestamp(ts));
    }
}
