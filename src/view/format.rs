//! Display formatting rules for customer rows and summary tiles.

use crate::consts::cli_consts::NO_ACTIVITY_LABEL;
use crate::models::{CustomerStatus, RiskLevel};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

/// Urgency classification of days overdue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum OverdueBucket {
    Low,
    Medium,
    High,
}

impl OverdueBucket {
    /// `low` up to a week, `medium` up to 30 days, `high` beyond.
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=7 => OverdueBucket::Low,
            8..=30 => OverdueBucket::Medium,
            _ => OverdueBucket::High,
        }
    }

    /// CSS class used by the HTML snapshot.
    pub fn css_class(&self) -> &'static str {
        match self {
            OverdueBucket::Low => "overdue-low",
            OverdueBucket::Medium => "overdue-med",
            OverdueBucket::High => "overdue-high",
        }
    }
}

/// `(NNN) NNN-NNNN` for ten-digit numbers, anything else unchanged.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return raw.to_string();
    }
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// `promised_to_pay` -> `Promised To Pay`. Unknown values go through the same transform.
pub fn humanize(raw: &str) -> String {
    raw.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn status_label(status: &CustomerStatus) -> String {
    humanize(status.as_str())
}

pub fn risk_label(level: &RiskLevel) -> String {
    humanize(level.as_str())
}

/// Two-decimal currency with thousands separators, e.g. `$1,234.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Whole amount with thousands separators and no decimals, e.g. `1,235`.
pub fn format_whole(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.0}", rounded.abs());
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}", sign, group_thousands(&text))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Parse the timestamp shapes the backend emits: RFC 3339, naive ISO date-time
/// (interpreted as local time), or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Local));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Local.from_local_datetime(&naive).earliest()
}

/// `Today`, `Yesterday`, `N days ago` within a week, else `Mon D`.
///
/// Missing or unparseable timestamps render the placeholder.
pub fn last_activity_label(raw: Option<&str>, now: DateTime<Local>) -> String {
    let Some(timestamp) = raw.and_then(parse_timestamp) else {
        return NO_ACTIVITY_LABEL.to_string();
    };
    let days = (now - timestamp).num_days();
    match days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        _ => timestamp.format("%b %-d").to_string(),
    }
}

/// Escape text for interpolation into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn local(s: &str) -> DateTime<Local> {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_overdue_bucket_boundaries() {
        assert_eq!(OverdueBucket::from_days(0), OverdueBucket::Low);
        assert_eq!(OverdueBucket::from_days(7), OverdueBucket::Low);
        assert_eq!(OverdueBucket::from_days(8), OverdueBucket::Medium);
        assert_eq!(OverdueBucket::from_days(30), OverdueBucket::Medium);
        assert_eq!(OverdueBucket::from_days(31), OverdueBucket::High);
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("5551234567"), "(555) 123-4567");
        assert_eq!(format_phone("555-123-4567"), "(555) 123-4567");
        assert_eq!(format_phone("12345"), "12345");
        assert_eq!(format_phone("+18887776666"), "+18887776666");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(&CustomerStatus::PromisedToPay), "Promised To Pay");
        assert_eq!(status_label(&CustomerStatus::WrongNumber), "Wrong Number");
        assert_eq!(status_label(&CustomerStatus::Active), "Active");
        assert_eq!(
            status_label(&CustomerStatus::Other("disputed".to_string())),
            "Disputed"
        );
        assert_eq!(
            status_label(&CustomerStatus::Other("legal_hold".to_string())),
            "Legal Hold"
        );
        assert_eq!(risk_label(&RiskLevel::High), "High");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec("1234.5")), "$1,234.50");
        assert_eq!(format_currency(dec("0")), "$0.00");
        assert_eq!(format_currency(dec("999.995")), "$1,000.00");
        assert_eq!(format_currency(dec("1234567.891")), "$1,234,567.89");
    }

    #[test]
    fn test_format_whole() {
        assert_eq!(format_whole(dec("1234.5")), "1,235");
        assert_eq!(format_whole(dec("999.49")), "999");
        assert_eq!(format_whole(Decimal::ZERO), "0");
        assert_eq!(format_whole(dec("1000000")), "1,000,000");
    }

    #[test]
    fn test_last_activity_labels() {
        let now = local("2026-10-17T12:00:00");
        assert_eq!(last_activity_label(None, now), "Never");
        assert_eq!(last_activity_label(Some("garbage"), now), "Never");
        assert_eq!(last_activity_label(Some("2026-10-17T08:00:00"), now), "Today");
        assert_eq!(
            last_activity_label(Some("2026-10-16T08:00:00"), now),
            "Yesterday"
        );
        assert_eq!(
            last_activity_label(Some("2026-10-13T12:00:00"), now),
            "4 days ago"
        );
        assert_eq!(last_activity_label(Some("2026-09-05"), now), "Sep 5");
        // Clock skew: a timestamp slightly in the future still reads as today.
        assert_eq!(last_activity_label(Some("2026-10-17T13:00:00"), now), "Today");
    }

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp("2026-10-16T09:30:00+00:00").unwrap();
        assert_eq!(parsed.timestamp(), 1_792_143_000);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
        assert_eq!(escape_html("Maria Lopez"), "Maria Lopez");
    }
}
