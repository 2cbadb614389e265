//! Completed check report and "Last Checked" rendering.

use jiff::Timestamp;
use serde::Serialize;

use crate::check::{SafetyStatus, SourceVerdict, Verdict};

const SECS_PER_DAY: i64 = 86_400;

/// A successful check as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    pub url: String,
    pub status: SafetyStatus,
    /// Captured once, when the session entered `Succeeded`.
    pub checked_at: Timestamp,
    pub sources: Vec<SourceVerdict>,
}

impl SafetyReport {
    pub fn new(url: impl Into<String>, verdict: Verdict, checked_at: Timestamp) -> Self {
        Self {
            url: url.into(),
            status: verdict.status,
            checked_at,
            sources: verdict.sources,
        }
    }

    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }

    /// "Last Checked" relative to now.
    pub fn last_checked(&self) -> String {
        format_last_checked(self.checked_at, Timestamp::now())
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Coarse age of `checked_at` as seen at `now`: "Today", "3 days ago", "2 weeks ago", ...
///
/// Whole elapsed days are counted; timestamps in the future read as "Today".
pub fn format_last_checked(checked_at: Timestamp, now: Timestamp) -> String {
    let days = now.duration_since(checked_at).as_secs().max(0) / SECS_PER_DAY;
    match days {
        0 => "Today".to_string(),
        1..=6 => plural(days, "day"),
        7..=29 => plural(days / 7, "week"),
        30..=364 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn ago(now: Timestamp, days: i64) -> Timestamp {
        now.checked_sub(SignedDuration::from_secs(days * SECS_PER_DAY))
            .unwrap()
    }

    #[test]
    fn same_day_is_today() {
        let now: Timestamp = "2024-01-15T10:30:00Z".parse().unwrap();
        assert_eq!(format_last_checked(now, now), "Today");
        let earlier: Timestamp = "2024-01-14T11:00:00Z".parse().unwrap();
        assert_eq!(format_last_checked(earlier, now), "Today");
    }

    #[test]
    fn days_weeks_months_years() {
        let now: Timestamp = "2025-06-01T00:00:00Z".parse().unwrap();
        assert_eq!(format_last_checked(ago(now, 1), now), "1 day ago");
        assert_eq!(format_last_checked(ago(now, 6), now), "6 days ago");
        assert_eq!(format_last_checked(ago(now, 7), now), "1 week ago");
        assert_eq!(format_last_checked(ago(now, 29), now), "4 weeks ago");
        assert_eq!(format_last_checked(ago(now, 30), now), "1 month ago");
        assert_eq!(format_last_checked(ago(now, 364), now), "12 months ago");
        assert_eq!(format_last_checked(ago(now, 365), now), "1 year ago");
        assert_eq!(format_last_checked(ago(now, 800), now), "2 years ago");
    }

    #[test]
    fn future_timestamp_reads_as_today() {
        let now: Timestamp = "2025-06-01T00:00:00Z".parse().unwrap();
        assert_eq!(format_last_checked(ago(now, -3), now), "Today");
    }

    #[test]
    fn report_serializes_camel_case() {
        let verdict = Verdict {
            status: SafetyStatus::Unsafe,
            sources: vec![SourceVerdict {
                name: "Google Safe Browsing".to_string(),
                result: SafetyStatus::Unsafe,
            }],
        };
        let at: Timestamp = "2024-01-15T10:30:00Z".parse().unwrap();
        let report = SafetyReport::new("example.com", verdict, at);
        assert!(!report.is_safe());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "unsafe");
        assert_eq!(json["checkedAt"], "2024-01-15T10:30:00Z");
        assert_eq!(json["sources"][0]["name"], "Google Safe Browsing");
    }
}
