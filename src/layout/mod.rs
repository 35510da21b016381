//! Layout and placement engine: everything between the loaded schedule and
//! what ends up on screen, independent of the window toolkit's event loop.

mod interaction;
mod overlay;
mod projector;
mod schedule;
mod state;
mod timeline;
mod view;

pub use interaction::{Effect, OverlayController, Trigger};
pub use overlay::{place, place_anchored, place_docked, Indicator, OverlayPlacement, PlacementParams, Side};
pub use projector::{
    project, strategy_for, Element, GridArea, GridStrategy, LayoutStrategy, ListStrategy, PlacementError,
    Projection, SessionElement, TIME_COLUMN,
};
pub use schedule::{Day, Schedule, SessionId};
pub use state::RenderState;
pub use timeline::{Timeline, HEADER_ROW};
pub use view::{select_mode, ModeChange, RenderMode, ViewSelector, DEFAULT_BREAKPOINT};
