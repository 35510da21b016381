//! The vertical axis of the grid: every time anything starts or ends

use std::collections::{BTreeSet, HashMap};

use crate::api::{Session, TimePoint};

/// Axis row taken by the day headers; time rows start right after it
pub const HEADER_ROW: u32 = 1;
const FIRST_TIME_ROW: u32 = HEADER_ROW + 1;

/// Sorted, deduplicated time points together with their axis rows.
///
/// Built from the declared slots plus every session's start and end, so any
/// session taken into account here can always be placed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timeline {
    points: Vec<TimePoint>,
    rows: HashMap<TimePoint, u32>,
}

impl Timeline {
    pub fn normalize<'a>(
        labels: impl IntoIterator<Item = &'a TimePoint>,
        sessions: impl IntoIterator<Item = &'a Session>,
    ) -> Self {
        let mut union: BTreeSet<TimePoint> = labels.into_iter().cloned().collect();
        for session in sessions {
            union.insert(session.start.clone());
            union.insert(session.end.clone());
        }
        Self::from_sorted(union)
    }

    pub fn from_points(points: impl IntoIterator<Item = TimePoint>) -> Self {
        Self::from_sorted(points.into_iter().collect())
    }

    fn from_sorted(points: BTreeSet<TimePoint>) -> Self {
        let points: Vec<TimePoint> = points.into_iter().collect();
        let rows = points
            .iter()
            .zip(FIRST_TIME_ROW..)
            .map(|(point, row)| (point.clone(), row))
            .collect();
        Self { points, rows }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Axis row of a time point
    pub fn position(&self, point: &TimePoint) -> Option<u32> {
        self.rows.get(point).copied()
    }

    pub fn contains(&self, point: &TimePoint) -> bool {
        self.rows.contains_key(point)
    }

    /// (time point, axis row) in timeline order
    pub fn positions(&self) -> impl Iterator<Item = (&TimePoint, u32)> + '_ {
        self.points.iter().zip(FIRST_TIME_ROW..)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of grid rows needed, header included
    pub fn row_count(&self) -> u32 {
        HEADER_ROW + self.points.len() as u32
    }
}
