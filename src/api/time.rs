//! Clock-time tokens used as the schedule's timeline axis

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A point on the timeline, stored as a zero-padded 24-hour "HH:MM" token.
///
/// Ordering is plain string ordering, which matches chronological ordering
/// for every canonical token. Tokens that can't be read as a clock time are
/// kept verbatim so they surface later as placement diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TimePoint(String);

impl TimePoint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TimePoint {
    fn from(raw: String) -> Self {
        let trimmed = raw.trim();
        match parse_clock(trimmed) {
            Some(time) => TimePoint(time.format("%H:%M").to_string()),
            None => {
                log::warn!("Time \"{}\" is not a HH:MM clock time, keeping it as-is", trimmed);
                TimePoint(trimmed.to_string())
            }
        }
    }
}

impl From<&str> for TimePoint {
    fn from(raw: &str) -> Self {
        TimePoint::from(raw.to_string())
    }
}

impl From<TimePoint> for String {
    fn from(point: TimePoint) -> Self {
        point.0
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse "9:30", "09:30" or "09:30:00"
fn parse_clock(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

/// Caption for a session's time range, e.g. "09:00 – 10:30"
pub fn format_time_range(start: &TimePoint, end: &TimePoint) -> String {
    format!("{} – {}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digit_hours() {
        assert_eq!(TimePoint::from("9:30").as_str(), "09:30");
        assert_eq!(TimePoint::from(" 14:05 ").as_str(), "14:05");
    }

    #[test]
    fn drops_seconds() {
        assert_eq!(TimePoint::from("08:15:00").as_str(), "08:15");
    }

    #[test]
    fn keeps_unparseable_tokens() {
        let point = TimePoint::from("lunch");
        assert_eq!(point.as_str(), "lunch");
        assert_eq!(TimePoint::from("25:00").as_str(), "25:00");
    }

    #[test]
    fn string_order_is_chronological() {
        let mut points: Vec<TimePoint> = ["13:00", "9:00", "10:30", "09:45"]
            .into_iter()
            .map(TimePoint::from)
            .collect();
        points.sort();
        let tokens: Vec<&str> = points.iter().map(|p| p.as_str()).collect();
        assert_eq!(tokens, vec!["09:00", "09:45", "10:30", "13:00"]);
    }

    #[test]
    fn deserializes_and_canonicalises() {
        let point: TimePoint = serde_json::from_str("\"7:05\"").unwrap();
        assert_eq!(point.as_str(), "07:05");
        assert_eq!(serde_json::to_string(&point).unwrap(), "\"07:05\"");
    }

    #[test]
    fn range_caption() {
        let caption = format_time_range(&TimePoint::from("09:00"), &TimePoint::from("10:30"));
        assert_eq!(caption, "09:00 – 10:30");
    }
}
