//! Open/close state of the detail overlay.
//!
//! Raw pointer and keyboard input is translated by the window into three
//! logical triggers. Only one session can be open at a time.

use super::projector::Projection;
use super::schedule::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum OverlayState {
    #[default]
    Closed,
    Open(SessionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Click, tap, Enter or Space on a session
    Activate(SessionId),
    /// Click that hit neither the overlay nor any session
    ClickOutside,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Opened(SessionId),
    Switched { from: SessionId, to: SessionId },
    Closed { restore_focus: Option<SessionId> },
}

#[derive(Debug, Clone, Default)]
pub struct OverlayController {
    state: OverlayState,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<SessionId> {
        match self.state {
            OverlayState::Open(id) => Some(id),
            OverlayState::Closed => None,
        }
    }

    pub fn handle(&mut self, trigger: Trigger, projection: &Projection) -> Effect {
        let effect = match (self.state, trigger) {
            (state, Trigger::Activate(id)) => {
                let activatable = projection.session(id).is_some_and(|s| s.is_activatable());
                if !activatable {
                    Effect::None
                } else {
                    match state {
                        OverlayState::Closed => Effect::Opened(id),
                        OverlayState::Open(current) if current == id => Effect::Closed { restore_focus: None },
                        OverlayState::Open(current) => Effect::Switched { from: current, to: id },
                    }
                }
            }
            (OverlayState::Open(_), Trigger::ClickOutside) => Effect::Closed { restore_focus: None },
            (OverlayState::Open(current), Trigger::Escape) => Effect::Closed { restore_focus: Some(current) },
            (OverlayState::Closed, _) => Effect::None,
        };

        self.apply(effect);
        if effect != Effect::None {
            log::debug!("Overlay {:?} -> {:?}", trigger, effect);
        }
        effect
    }

    /// Close without restoring focus, used when the anchors are rebuilt
    pub fn reset(&mut self) -> Effect {
        let effect = match self.state {
            OverlayState::Open(_) => Effect::Closed { restore_focus: None },
            OverlayState::Closed => Effect::None,
        };
        self.apply(effect);
        effect
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Opened(id) | Effect::Switched { to: id, .. } => self.state = OverlayState::Open(id),
            Effect::Closed { .. } => self.state = OverlayState::Closed,
        }
    }
}
