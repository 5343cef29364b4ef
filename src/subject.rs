//! Business-hour extraction from email subject lines.
//!
//! Reporting emails arrive with subjects like "Hourly Report - Hour 9",
//! "2 PM", or "14:00". Each pattern is tried in order; a candidate outside
//! business hours falls through to the next pattern. If nothing lands in
//! 8..=17 the whole email is skipped by the caller — out-of-range hours are
//! rejected here, never clamped (unlike the manual upload path, which
//! clamps).

use std::sync::OnceLock;

use regex::Regex;

use crate::types::is_business_hour;

// Compile-once patterns, tried in order.
fn hour_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)hour\s*(\d{1,2})",        // "Hour 9", "hour 14"
            r"^(\d{1,2})$",                 // "9", "14"
            r"(?i)(\d{1,2})\s*(?:am|pm)",   // "9 AM", "2 PM"
            r"(\d{1,2}):00",                // "9:00", "14:00"
            r"(?i)time\s*(\d{1,2})",        // "Time 9"
            r"(?i)(\d{1,2})\s*o'?clock",    // "9 o'clock", "9 oclock"
        ]
        .iter()
        .map(|p| Regex::new(p).expect("hour pattern must compile"))
        .collect()
    })
}

/// Extract the business hour from an email subject, or `None` when no
/// pattern yields an hour inside 8..=17.
pub fn extract_hour(subject: &str) -> Option<u8> {
    let lowered = subject.to_lowercase();

    for pattern in hour_patterns() {
        let Some(caps) = pattern.captures(subject) else {
            continue;
        };
        let Ok(mut hour) = caps[1].parse::<u8>() else {
            continue;
        };

        // 12-hour adjustment keys off the whole subject, not the match.
        if lowered.contains("pm") && hour < 12 {
            hour += 12;
        } else if lowered.contains("am") && hour == 12 {
            hour = 0;
        }

        if is_business_hour(hour) {
            return Some(hour);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_keyword() {
        assert_eq!(extract_hour("Hour 9"), Some(9));
        assert_eq!(extract_hour("Hourly Report - hour 14"), Some(14));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(extract_hour("9"), Some(9));
        assert_eq!(extract_hour("14"), Some(14));
        assert_eq!(extract_hour("25"), None);
    }

    #[test]
    fn test_am_pm() {
        assert_eq!(extract_hour("2 PM"), Some(14));
        assert_eq!(extract_hour("9 AM"), Some(9));
        assert_eq!(extract_hour("12 PM"), Some(12));
        // 12 AM is midnight — outside business hours
        assert_eq!(extract_hour("12 AM"), None);
        // 7 AM is before opening
        assert_eq!(extract_hour("7 AM"), None);
    }

    #[test]
    fn test_clock_formats() {
        assert_eq!(extract_hour("9:00"), Some(9));
        assert_eq!(extract_hour("Report 14:00"), Some(14));
        assert_eq!(extract_hour("9 o'clock"), Some(9));
        assert_eq!(extract_hour("9 oclock"), Some(9));
        assert_eq!(extract_hour("Time 10"), Some(10));
    }

    #[test]
    fn test_out_of_range_is_rejected_not_clamped() {
        assert_eq!(extract_hour("Hour 20"), None);
        assert_eq!(extract_hour("Hour 7"), None);
        assert_eq!(extract_hour("Hour 0"), None);
    }

    #[test]
    fn test_out_of_range_match_falls_through_to_later_pattern() {
        // "hour 20" fails the range check, but "2 pm" later in the subject
        // still resolves via the am/pm pattern.
        assert_eq!(extract_hour("Hour 20 resend for 2 pm"), Some(14));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_hour("Weekly newsletter"), None);
        assert_eq!(extract_hour(""), None);
    }
}
