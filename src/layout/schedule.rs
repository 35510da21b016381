use std::collections::BTreeMap;

use crate::api::{ScheduleData, Session};

use super::timeline::Timeline;

/// Index of a session in load order; stable for the lifetime of a [`Schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub ordinal: u32,
    pub title: String,
    pub start_column: u32,
    pub column_span: u32,
    /// Referenced by a session but missing from the day descriptors
    pub placeholder: bool,
}

impl Day {
    fn placeholder(ordinal: u32) -> Self {
        Self {
            ordinal,
            title: format!("Day {}", ordinal),
            // Day N sits at column N + 1, never over the time labels
            start_column: ordinal.saturating_add(1).max(2),
            column_span: 1,
            placeholder: true,
        }
    }

    /// Last grid column covered by this day, inclusive
    pub fn end_column(&self) -> u32 {
        self.start_column.saturating_add(self.column_span.max(1) - 1)
    }
}

/// Loaded schedule with its normalized timeline. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Schedule {
    days: Vec<Day>,
    sessions: Vec<Session>,
    timeline: Timeline,
}

impl Schedule {
    pub fn from_data(data: ScheduleData) -> Self {
        let mut days: BTreeMap<u32, Day> = data
            .days
            .into_iter()
            .map(|(ordinal, descriptor)| {
                let day = Day {
                    ordinal,
                    title: descriptor.title,
                    start_column: descriptor.start_column.max(2),
                    column_span: descriptor.column_span.max(1),
                    placeholder: false,
                };
                (ordinal, day)
            })
            .collect();

        for session in &data.sessions {
            days.entry(session.day).or_insert_with(|| {
                log::warn!(
                    "Session \"{}\" refers to undeclared day {}, using a placeholder",
                    session.title,
                    session.day
                );
                Day::placeholder(session.day)
            });
        }

        let timeline = Timeline::normalize(&data.time_slots, &data.sessions);
        log::info!(
            "Loaded {} day(s), {} session(s), {} time point(s)",
            days.len(),
            data.sessions.len(),
            timeline.len()
        );

        Self {
            days: days.into_values().collect(),
            sessions: data.sessions,
            timeline,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    /// Days in ordinal order
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, ordinal: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.ordinal == ordinal)
    }

    pub fn sessions(&self) -> impl Iterator<Item = (SessionId, &Session)> {
        self.sessions.iter().enumerate().map(|(i, s)| (SessionId(i), s))
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(id.0)
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Rightmost grid column used by any day
    pub fn column_count(&self) -> u32 {
        self.days.iter().map(Day::end_column).max().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(json: &str) -> Schedule {
        Schedule::from_data(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn missing_day_gets_placeholder() {
        let schedule = load(
            r#"{
                "days": { "1": { "title": "Mon", "start_column": 2, "column_span": 1 } },
                "sessions": [
                    { "day": 3, "start": "09:00", "end": "10:00", "title": "Orphan" }
                ]
            }"#,
        );

        let orphan_day = schedule.day(3).unwrap();
        assert_eq!(orphan_day.title, "Day 3");
        assert!(orphan_day.placeholder);
        assert_eq!(orphan_day.start_column, 4);
        assert_eq!(schedule.days().len(), 2);
        assert_eq!(schedule.column_count(), 4);
    }

    #[test]
    fn placeholder_for_day_zero_stays_right_of_time_labels() {
        let schedule = load(r#"{ "sessions": [{ "day": 0, "start": "09:00", "end": "10:00", "title": "Zero" }] }"#);
        let day = schedule.day(0).unwrap();
        assert_eq!(day.title, "Day 0");
        assert_eq!(day.start_column, 2);
        assert_eq!(day.end_column(), 2);
    }

    #[test]
    fn placeholder_for_the_largest_ordinal_does_not_overflow() {
        let schedule = load(r#"{ "sessions": [{ "day": 4294967295, "start": "09:00", "end": "10:00", "title": "Far" }] }"#);
        let day = schedule.day(u32::MAX).unwrap();
        assert_eq!(day.start_column, u32::MAX);
        assert_eq!(day.end_column(), u32::MAX);
    }

    #[test]
    fn wide_declared_day_saturates_its_end_column() {
        let schedule = load(r#"{ "days": { "1": { "title": "Mon", "start_column": 4294967290, "column_span": 100 } } }"#);
        assert_eq!(schedule.day(1).unwrap().end_column(), u32::MAX);
    }

    #[test]
    fn days_are_ordered_by_ordinal() {
        let schedule = load(
            r#"{
                "days": {
                    "2": { "title": "Tue", "start_column": 4, "column_span": 2 },
                    "1": { "title": "Mon", "start_column": 2, "column_span": 2 }
                }
            }"#,
        );
        let titles: Vec<&str> = schedule.days().iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Mon", "Tue"]);
        assert_eq!(schedule.day(2).unwrap().end_column(), 5);
    }

    #[test]
    fn timeline_covers_session_times() {
        let schedule = load(
            r#"{
                "time_slots": ["09:00"],
                "sessions": [{ "day": 1, "start": "09:15", "end": "09:50", "title": "Talk" }]
            }"#,
        );
        let tokens: Vec<&str> = schedule.timeline().points().iter().map(|p| p.as_str()).collect();
        assert_eq!(tokens, vec!["09:00", "09:15", "09:50"]);
    }

    #[test]
    fn day_columns_never_overlap_time_labels() {
        let schedule = load(r#"{ "days": { "1": { "title": "Mon", "start_column": 1, "column_span": 0 } } }"#);
        let day = schedule.day(1).unwrap();
        assert_eq!(day.start_column, 2);
        assert_eq!(day.column_span, 1);
    }
}
