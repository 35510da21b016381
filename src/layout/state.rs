use super::interaction::{Effect, OverlayController, Trigger};
use super::projector::{project, Projection};
use super::schedule::{Schedule, SessionId};
use super::view::{ModeChange, RenderMode, ViewSelector};

/// Everything that changes while a schedule is on screen: the current
/// projection (which remembers its own mode) and the overlay state.
pub struct RenderState {
    schedule: Schedule,
    selector: ViewSelector,
    projection: Option<Projection>,
    controller: OverlayController,
    rebuilds: usize,
}

impl RenderState {
    pub fn new(schedule: Schedule, selector: ViewSelector) -> Self {
        Self {
            schedule,
            selector,
            projection: None,
            controller: OverlayController::new(),
            rebuilds: 0,
        }
    }

    /// React to the current viewport width. Re-projects only when the mode
    /// flips; an open overlay is closed then, since its anchor is gone.
    /// Returns whether a rebuild happened.
    pub fn on_resize(&mut self, viewport_width: f32) -> bool {
        match self.selector.observe(viewport_width, self.mode()) {
            ModeChange::Unchanged => false,
            ModeChange::Changed { from, to } => {
                log::debug!("Render mode {:?} -> {:?} at width {}", from, to, viewport_width);
                self.controller.reset();
                self.projection = Some(project(to, &self.schedule));
                self.rebuilds += 1;
                true
            }
        }
    }

    pub fn handle(&mut self, trigger: Trigger) -> Effect {
        match &self.projection {
            Some(projection) => self.controller.handle(trigger, projection),
            None => Effect::None,
        }
    }

    pub fn mode(&self) -> Option<RenderMode> {
        self.projection.as_ref().map(|p| p.mode)
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    pub fn active(&self) -> Option<SessionId> {
        self.controller.active()
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScheduleData;

    fn state() -> RenderState {
        let data: ScheduleData = serde_json::from_str(
            r#"{ "sessions": [{ "day": 1, "start": "09:00", "end": "10:00", "title": "Talk", "details": "x" }] }"#,
        )
        .unwrap();
        RenderState::new(Schedule::from_data(data), ViewSelector::default())
    }

    #[test]
    fn nothing_is_rendered_before_the_first_resize() {
        let mut state = state();
        assert_eq!(state.mode(), None);
        assert_eq!(state.handle(Trigger::Activate(SessionId(0))), Effect::None);
    }

    #[test]
    fn rebuilds_only_on_mode_change() {
        let mut state = state();
        assert!(state.on_resize(801.0));
        assert_eq!(state.mode(), Some(RenderMode::Grid));
        assert!(!state.on_resize(900.0));
        assert!(!state.on_resize(1600.0));
        assert_eq!(state.rebuilds(), 1);

        assert!(state.on_resize(799.0));
        assert_eq!(state.mode(), Some(RenderMode::List));
        assert!(!state.on_resize(320.0));
        assert_eq!(state.rebuilds(), 2);
    }

    #[test]
    fn overlay_survives_resize_within_a_mode() {
        let mut state = state();
        state.on_resize(1000.0);
        state.handle(Trigger::Activate(SessionId(0)));
        state.on_resize(1100.0);
        assert_eq!(state.active(), Some(SessionId(0)));
    }

    #[test]
    fn mode_change_closes_the_overlay() {
        let mut state = state();
        state.on_resize(1000.0);
        state.handle(Trigger::Activate(SessionId(0)));
        state.on_resize(500.0);
        assert_eq!(state.active(), None);
    }
}
