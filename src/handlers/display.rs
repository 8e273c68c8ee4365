//! Shared terminal formatting for handlers.

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use maintlog::engine::status::DueStatus;
use maintlog::engine::types::Interval;

pub fn status_icon(status: DueStatus) -> ColoredString {
    match status {
        DueStatus::Overdue => "✗".red(),
        DueStatus::DueSoon => "⚡".yellow(),
        DueStatus::Ok => "✓".green(),
    }
}

pub fn status_label(status: DueStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        DueStatus::Overdue => text.red().bold(),
        DueStatus::DueSoon => text.yellow(),
        DueStatus::Ok => text.green(),
    }
}

/// Odometer-style number: thousands grouped, one decimal only when needed.
#[allow(clippy::cast_possible_truncation)]
pub fn format_distance(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let total_tenths = (value.abs() * 10.0).round() as u64;
    let whole = group_thousands(total_tenths / 10);
    let tenths = total_tenths % 10;
    if tenths == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{tenths}")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Remaining distance, clamped at zero for display. `-` when untracked.
pub fn format_distance_remaining(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v < 0.0 => format!("0 (over by {})", format_distance(-v)),
        Some(v) => format_distance(v),
    }
}

/// Remaining days, clamped at zero for display. `-` when untracked.
pub fn format_days_remaining(value: Option<i64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v < 0 => format!("0 (over by {} days)", -v),
        Some(v) => format!("{v} days"),
    }
}

pub fn format_interval(interval: &Interval) -> String {
    match (interval.distance, interval.days) {
        (Some(d), Some(days)) => format!("every {} or {days} days", format_distance(d)),
        (Some(d), None) => format!("every {}", format_distance(d)),
        (None, Some(days)) => format!("every {days} days"),
        (None, None) => "no interval".to_string(),
    }
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "(undated)".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0");
        assert_eq!(format_distance(999.0), "999");
        assert_eq!(format_distance(12_345.0), "12,345");
        assert_eq!(format_distance(1_000_000.0), "1,000,000");
        assert_eq!(format_distance(1234.5), "1,234.5");
        assert_eq!(format_distance(-250.0), "-250");
        assert_eq!(format_distance(1234.96), "1,235");
        assert_eq!(format_distance(999.97), "1,000");
        assert_eq!(format_distance(0.04), "0");
    }

    #[test]
    fn test_remaining_is_clamped() {
        assert_eq!(format_distance_remaining(None), "-");
        assert_eq!(format_distance_remaining(Some(400.0)), "400");
        assert_eq!(format_distance_remaining(Some(-1500.0)), "0 (over by 1,500)");
        assert_eq!(format_days_remaining(Some(-5)), "0 (over by 5 days)");
        assert_eq!(format_days_remaining(Some(0)), "0 days");
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(&Interval::both(5500.0, 180)), "every 5,500 or 180 days");
        assert_eq!(format_interval(&Interval::days(1095)), "every 1095 days");
        assert_eq!(format_interval(&Interval::default()), "no interval");
    }
}
