//! Plain-text rendering of check reports and toasts.

use urlsafe_core::check::SafetyStatus;
use urlsafe_core::report::{format_last_checked, SafetyReport};
use jiff::Timestamp;

fn status_label(status: SafetyStatus) -> &'static str {
    match status {
        SafetyStatus::Safe => "Safe",
        SafetyStatus::Unsafe => "Unsafe",
    }
}

/// Report as shown on the checker screen, with "Last Checked" relative to `now`.
pub(super) fn render_report(report: &SafetyReport, now: Timestamp) -> String {
    let mut out = format!(
        "Overall Status: {}\n\nURL Info\n  URL:          {}\n  Last Checked: {}\n\nDetailed Source Results\n",
        status_label(report.status),
        report.url,
        format_last_checked(report.checked_at, now)
    );
    if report.sources.is_empty() {
        out.push_str("  (no per-source results)\n");
    }
    for source in &report.sources {
        out.push_str(&format!(
            "  {:<24} {}\n",
            source.name,
            status_label(source.result)
        ));
    }
    out
}

pub(super) fn render_toast(message: &str) -> String {
    format!("[!] Error\n{message}")
}
