//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Worker;
use crate::view::format::OverdueBucket;
use ratatui::prelude::Color;

/// Get a ratatui color for a worker based on its type
pub fn get_worker_color(worker: &Worker) -> Color {
    match worker {
        Worker::Refresher => Color::Cyan,
        Worker::Roster => Color::LightBlue,
        Worker::Caller => Color::Yellow,
        Worker::Editor => Color::Green,
    }
}

pub fn overdue_color(bucket: OverdueBucket) -> Color {
    match bucket {
        OverdueBucket::Low => Color::Green,
        OverdueBucket::Medium => Color::Yellow,
        OverdueBucket::High => Color::Red,
    }
}

/// Strip control characters from backend text before it reaches the terminal.
pub fn sanitize_terminal(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    if msg.contains("Reqwest error") && msg.contains("timed out") {
        return shorten_before(msg, "Reqwest error", "Request timed out");
    }
    if msg.contains("Reqwest error") && msg.contains("connect") {
        return shorten_before(msg, "Reqwest error", "Backend unreachable");
    }
    msg.to_string()
}

fn shorten_before(msg: &str, marker: &str, replacement: &str) -> String {
    match msg.find(marker) {
        Some(0) | None => replacement.to_string(),
        Some(i) => format!("{}{}", &msg[..i], replacement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_escape_sequences() {
        assert_eq!(sanitize_terminal("Mar\x1b[31mia\n"), "Mar[31mia");
        assert_eq!(sanitize_terminal("José"), "José");
    }

    #[test]
    fn test_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2026-10-17 09:05:33"), "10-17 09:05");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn test_clean_http_error_message() {
        assert_eq!(
            clean_http_error_message(
                "Failed to load customers: Reqwest error: error sending request: operation timed out"
            ),
            "Failed to load customers: Request timed out"
        );
        assert_eq!(
            clean_http_error_message("Reqwest error: error trying to connect: refused"),
            "Backend unreachable"
        );
        assert_eq!(clean_http_error_message("Loaded 3 customers"), "Loaded 3 customers");
    }
}
