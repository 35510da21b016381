/// Viewport widths at or below this render as a list
pub const DEFAULT_BREAKPOINT: f32 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    Grid,  // day columns × time rows
    List,  // one full-width row per session, grouped by day
}

pub fn select_mode(viewport_width: f32, breakpoint: f32) -> RenderMode {
    if viewport_width <= breakpoint {
        RenderMode::List
    } else {
        RenderMode::Grid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Unchanged,
    Changed { from: Option<RenderMode>, to: RenderMode },
}

/// Decides whether a resize calls for a different rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSelector {
    breakpoint: f32,
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT)
    }
}

impl ViewSelector {
    pub fn new(breakpoint: f32) -> Self {
        Self { breakpoint }
    }

    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    /// Compare the mode for `viewport_width` with the mode currently on screen
    pub fn observe(&self, viewport_width: f32, rendered: Option<RenderMode>) -> ModeChange {
        let wanted = select_mode(viewport_width, self.breakpoint);
        if rendered == Some(wanted) {
            ModeChange::Unchanged
        } else {
            ModeChange::Changed { from: rendered, to: wanted }
        }
    }
}
