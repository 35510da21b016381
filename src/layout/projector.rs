//! Projects a schedule onto the grid or the list rendering

use crate::api::{format_details, format_time_range, Session, TimePoint, DETAILS_COMING_SOON};

use super::schedule::{Day, Schedule, SessionId};
use super::timeline::HEADER_ROW;
use super::view::RenderMode;

/// Column holding the time labels
pub const TIME_COLUMN: u32 = 1;

/// A rectangular span of grid cells, 1-based like CSS grid lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub column: u32,
    pub column_span: u32,
    pub row: u32,
    pub row_span: u32,
}

impl GridArea {
    pub fn cell(column: u32, row: u32) -> Self {
        Self { column, column_span: 1, row, row_span: 1 }
    }
}

/// Everything the interaction layer needs to know about a rendered session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionElement {
    pub id: SessionId,
    pub day: u32,
    pub title: String,
    pub details: String,
    pub category: String,
    pub time_range: String,
    /// None in list mode
    pub area: Option<GridArea>,
}

impl SessionElement {
    fn new(id: SessionId, session: &Session, area: Option<GridArea>) -> Self {
        Self {
            id,
            day: session.day,
            title: session.title.clone(),
            details: format_details(session),
            category: session.category.clone(),
            time_range: format_time_range(&session.start, &session.end),
            area,
        }
    }

    /// Sessions without details don't open an overlay
    pub fn is_activatable(&self) -> bool {
        self.details != DETAILS_COMING_SOON
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Grid column header
    DayLabel { day: u32, title: String, area: GridArea },
    /// Grid row header
    TimeLabel { time: TimePoint, area: GridArea },
    /// List section header
    DayHeader { day: u32, title: String },
    Session(SessionElement),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("session \"{title}\" starts at {time}, which is not on the timeline")]
    UnknownStart { session: SessionId, title: String, time: TimePoint },
    #[error("session \"{title}\" ends at {time}, which is not on the timeline")]
    UnknownEnd { session: SessionId, title: String, time: TimePoint },
    #[error("session \"{title}\" ends at {end}, before it starts at {start}")]
    EmptySpan { session: SessionId, title: String, start: TimePoint, end: TimePoint },
}

impl PlacementError {
    pub fn session(&self) -> SessionId {
        match self {
            PlacementError::UnknownStart { session, .. }
            | PlacementError::UnknownEnd { session, .. }
            | PlacementError::EmptySpan { session, .. } => *session,
        }
    }
}

/// The rendered output of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub mode: RenderMode,
    pub elements: Vec<Element>,
    /// Sessions that were left out, grid mode only
    pub diagnostics: Vec<PlacementError>,
    /// (columns, rows) of the grid; (0, 0) for the list
    pub extent: (u32, u32),
}

impl Projection {
    pub fn sessions(&self) -> impl Iterator<Item = &SessionElement> {
        self.elements.iter().filter_map(|e| match e {
            Element::Session(s) => Some(s),
            _ => None,
        })
    }

    pub fn session(&self, id: SessionId) -> Option<&SessionElement> {
        self.sessions().find(|s| s.id == id)
    }
}

pub trait LayoutStrategy {
    fn mode(&self) -> RenderMode;
    fn project(&self, schedule: &Schedule) -> Projection;
}

pub struct GridStrategy;
pub struct ListStrategy;

pub fn strategy_for(mode: RenderMode) -> &'static dyn LayoutStrategy {
    match mode {
        RenderMode::Grid => &GridStrategy,
        RenderMode::List => &ListStrategy,
    }
}

pub fn project(mode: RenderMode, schedule: &Schedule) -> Projection {
    strategy_for(mode).project(schedule)
}

impl LayoutStrategy for GridStrategy {
    fn mode(&self) -> RenderMode {
        RenderMode::Grid
    }

    fn project(&self, schedule: &Schedule) -> Projection {
        let timeline = schedule.timeline();
        let mut elements = Vec::new();
        let mut diagnostics = Vec::new();

        for day in schedule.days() {
            elements.push(Element::DayLabel {
                day: day.ordinal,
                title: day.title.clone(),
                area: GridArea {
                    column: day.start_column,
                    column_span: day.column_span,
                    row: HEADER_ROW,
                    row_span: 1,
                },
            });
        }

        for (time, row) in timeline.positions() {
            elements.push(Element::TimeLabel {
                time: time.clone(),
                area: GridArea::cell(TIME_COLUMN, row),
            });
        }

        for (id, session) in schedule.sessions() {
            match place_in_grid(id, session, schedule) {
                Ok(area) => elements.push(Element::Session(SessionElement::new(id, session, Some(area)))),
                Err(err) => {
                    log::warn!("Skipping session: {}", err);
                    diagnostics.push(err);
                }
            }
        }

        Projection {
            mode: RenderMode::Grid,
            elements,
            diagnostics,
            extent: (schedule.column_count(), timeline.row_count()),
        }
    }
}

fn place_in_grid(id: SessionId, session: &Session, schedule: &Schedule) -> Result<GridArea, PlacementError> {
    let timeline = schedule.timeline();
    let start_row = timeline.position(&session.start).ok_or_else(|| PlacementError::UnknownStart {
        session: id,
        title: session.title.clone(),
        time: session.start.clone(),
    })?;
    let end_row = timeline.position(&session.end).ok_or_else(|| PlacementError::UnknownEnd {
        session: id,
        title: session.title.clone(),
        time: session.end.clone(),
    })?;
    if end_row <= start_row {
        return Err(PlacementError::EmptySpan {
            session: id,
            title: session.title.clone(),
            start: session.start.clone(),
            end: session.end.clone(),
        });
    }

    // Schedule::from_data guarantees every referenced day exists
    let (column, column_span) = match schedule.day(session.day) {
        Some(day) => columns_within(day, session),
        None => (session.day.saturating_add(1).max(2), 1),
    };

    Ok(GridArea {
        column,
        column_span,
        row: start_row,
        row_span: end_row - start_row,
    })
}

/// Clamp a session's column offset and span to its day's columns
fn columns_within(day: &Day, session: &Session) -> (u32, u32) {
    let offset = session.column.unwrap_or(1).clamp(1, day.column_span) - 1;
    let column = day.start_column.saturating_add(offset).min(day.end_column());
    let room = day.end_column() - column + 1;
    let span = session.column_span.unwrap_or(room).clamp(1, room);
    (column, span)
}

impl LayoutStrategy for ListStrategy {
    fn mode(&self) -> RenderMode {
        RenderMode::List
    }

    fn project(&self, schedule: &Schedule) -> Projection {
        let mut elements = Vec::new();

        for day in schedule.days() {
            let mut sessions: Vec<(SessionId, &Session)> = schedule
                .sessions()
                .filter(|(_, s)| s.day == day.ordinal)
                .collect();
            // Stable sort keeps declaration order for identical times
            sessions.sort_by(|(_, a), (_, b)| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));

            elements.push(Element::DayHeader { day: day.ordinal, title: day.title.clone() });
            elements.extend(
                sessions
                    .into_iter()
                    .map(|(id, session)| Element::Session(SessionElement::new(id, session, None))),
            );
        }

        Projection {
            mode: RenderMode::List,
            elements,
            diagnostics: Vec::new(),
            extent: (0, 0),
        }
    }
}
