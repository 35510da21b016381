use std::io::Write;

use egui::{pos2, vec2, Rect};
use schedule_board::api::{ScheduleClient, ScheduleData, ScheduleSource, SourceError, DETAILS_COMING_SOON};
use schedule_board::layout::{
    place, project, Effect, Element, GridArea, OverlayController, PlacementParams, RenderMode, RenderState,
    Schedule, SessionId, Side, Trigger, ViewSelector,
};

const DEMO: &str = include_str!("../demos/schedule.json");

const KEYNOTE: SessionId = SessionId(0);
const SYSTEMS_TRACK: SessionId = SessionId(1);
const WORKSHOP: SessionId = SessionId(2);
const COFFEE: SessionId = SessionId(3);
const PANEL: SessionId = SessionId(4);
const SMALL_SCREENS: SessionId = SessionId(5);

fn demo() -> Schedule {
    let data: ScheduleData = serde_json::from_str(DEMO).unwrap();
    Schedule::from_data(data)
}

#[test]
fn demo_timeline_merges_slots_and_session_times() {
    let schedule = demo();
    let points: Vec<&str> = schedule.timeline().points().iter().map(|p| p.as_str()).collect();
    assert_eq!(
        points,
        ["09:00", "09:30", "10:00", "10:45", "11:00", "11:30", "12:00", "13:00", "14:00"]
    );
}

#[test]
fn grid_places_every_demo_session() {
    let projection = project(RenderMode::Grid, &demo());
    assert!(projection.diagnostics.is_empty());
    assert_eq!(projection.sessions().count(), 7);

    let area = |id| projection.session(id).and_then(|s| s.area).unwrap();
    assert_eq!(area(KEYNOTE), GridArea { column: 2, column_span: 2, row: 2, row_span: 2 });
    assert_eq!(area(SYSTEMS_TRACK), GridArea { column: 2, column_span: 1, row: 4, row_span: 3 });
    assert_eq!(area(WORKSHOP), GridArea { column: 3, column_span: 1, row: 4, row_span: 3 });
    assert_eq!(area(SMALL_SCREENS), GridArea { column: 4, column_span: 1, row: 3, row_span: 2 });

    let day_titles: Vec<&str> = projection
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::DayLabel { title, .. } => Some(title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(day_titles, ["Monday", "Tuesday"]);
}

#[test]
fn list_groups_sessions_under_day_headers() {
    let projection = project(RenderMode::List, &demo());
    let headers = projection
        .elements
        .iter()
        .filter(|e| matches!(e, Element::DayHeader { .. }))
        .count();
    assert_eq!(headers, 2);
    assert!(projection.sessions().all(|s| s.area.is_none()));
}

#[test]
fn detail_text_is_formatted_per_kind() {
    let projection = project(RenderMode::Grid, &demo());
    let details = |id| projection.session(id).map(|s| s.details.clone()).unwrap();

    assert!(details(SYSTEMS_TRACK).starts_with("1. Lock-free queues in practice"));
    assert!(details(SYSTEMS_TRACK).contains("R. Ortega (Northwind Labs)"));
    assert!(details(PANEL).starts_with("Moderator: A. Novak (Foundation)"));
    assert!(details(PANEL).contains("• L. Moreau"));
    assert_eq!(details(COFFEE), DETAILS_COMING_SOON);
}

#[test]
fn click_through_a_session_and_place_the_overlay() {
    let schedule = demo();
    let projection = project(RenderMode::Grid, &schedule);
    let mut controller = OverlayController::new();

    assert_eq!(controller.handle(Trigger::Activate(COFFEE), &projection), Effect::None);
    assert_eq!(controller.handle(Trigger::Activate(KEYNOTE), &projection), Effect::Opened(KEYNOTE));
    assert_eq!(
        controller.handle(Trigger::Activate(PANEL), &projection),
        Effect::Switched { from: KEYNOTE, to: PANEL }
    );

    // Anchor near the bottom of the window: the overlay flips above it
    let viewport = Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 900.0));
    let anchor = Rect::from_min_size(pos2(500.0, 800.0), vec2(150.0, 60.0));
    let params = PlacementParams::default();
    let placement = place(RenderMode::Grid, anchor, vec2(340.0, 300.0), viewport, &params);
    assert_eq!(placement.side, Side::Above);
    assert_eq!(placement.max_height, None);
    assert!(viewport.contains_rect(placement.rect));
    assert!(placement.rect.max.y <= anchor.min.y);

    assert_eq!(
        controller.handle(Trigger::Escape, &projection),
        Effect::Closed { restore_focus: Some(PANEL) }
    );
}

#[test]
fn narrow_window_docks_the_overlay() {
    let mut state = RenderState::new(demo(), ViewSelector::default());
    state.on_resize(420.0);
    assert_eq!(state.mode(), Some(RenderMode::List));
    assert_eq!(state.handle(Trigger::Activate(WORKSHOP)), Effect::Opened(WORKSHOP));

    let viewport = Rect::from_min_size(pos2(0.0, 0.0), vec2(420.0, 800.0));
    let params = PlacementParams::default();
    let anchor = Rect::from_min_size(pos2(12.0, 100.0), vec2(396.0, 56.0));
    let placement = place(RenderMode::List, anchor, vec2(396.0, 1000.0), viewport, &params);
    assert_eq!(placement.side, Side::Docked);
    assert_eq!(placement.indicator, None);
    let max_height = placement.max_height.unwrap();
    assert!((max_height - 480.0).abs() < 0.01, "docked height {}", max_height);
    assert!(viewport.contains_rect(placement.rect));

    // Back to a wide window: rebuilt as a grid, overlay closed
    assert!(state.on_resize(1400.0));
    assert_eq!(state.active(), None);
}

#[tokio::test]
async fn fetches_schedule_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DEMO.as_bytes()).unwrap();

    let client = ScheduleClient::new(ScheduleSource::File(file.path().to_path_buf())).unwrap();
    let data = client.fetch().await.unwrap();
    assert_eq!(data.sessions.len(), 7);
    assert_eq!(data.days.len(), 2);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.json");

    let client = ScheduleClient::new(ScheduleSource::File(path)).unwrap();
    assert!(matches!(client.fetch().await, Err(SourceError::Io { .. })));
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{ \"sessions\": [").unwrap();

    let client = ScheduleClient::new(ScheduleSource::File(file.path().to_path_buf())).unwrap();
    assert!(matches!(client.fetch().await, Err(SourceError::Parse(_))));
}
