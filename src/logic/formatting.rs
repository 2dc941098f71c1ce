//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Format bytes into human-readable string (e.g., "1.20 KB", "5.30 MB")
///
/// # Examples
/// ```
/// use drivetui::logic::formatting::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1023), "1023 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(5 * 1024 * 1024), "5.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a millisecond epoch timestamp in UTC ("2024-03-01 14:05")
///
/// # Examples
/// ```
/// use drivetui::logic::formatting::format_timestamp_utc;
///
/// assert_eq!(format_timestamp_utc(0), "1970-01-01 00:00");
/// assert_eq!(format_timestamp_utc(1_709_301_900_000), "2024-03-01 14:05");
/// ```
pub fn format_timestamp_utc(timestamp_ms: u64) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms as i64).single() {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}

/// Same as [`format_timestamp_utc`] but in the local timezone, for the UI
pub fn format_timestamp(timestamp_ms: u64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms as i64) {
        Some(datetime) => datetime
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => String::new(),
    }
}

/// Compact "time since" for contact activity ("now", "4m", "3h", "2d")
///
/// # Examples
/// ```
/// use drivetui::logic::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(10_000, 70_000), "1m");
/// assert_eq!(format_elapsed(0, 30_000), "now");
/// assert_eq!(format_elapsed(0, 3 * 3_600_000), "3h");
/// assert_eq!(format_elapsed(0, 50 * 3_600_000), "2d");
/// ```
pub fn format_elapsed(since_ms: u64, now_ms: u64) -> String {
    let seconds = now_ms.saturating_sub(since_ms) / 1000;
    let days = seconds / 86400;
    let hours = seconds / 3600;
    let minutes = seconds / 60;

    if days > 0 {
        format!("{}d", days)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "now".to_string()
    }
}

/// Truncate to a display width, ending with an ellipsis when cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;
    use unicode_width::UnicodeWidthStr;

    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_bytes(3 * 1024u64.pow(4)), "3.00 TB");
    }

    #[test]
    fn test_format_elapsed_future_is_now() {
        assert_eq!(format_elapsed(100_000, 0), "now");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a-very-long-name.txt", 8), "a-very-…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
