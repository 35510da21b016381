// Library interface for schedule-board
// The binary only wires these together with a window

pub mod api;
pub mod config;
pub mod layout;
pub mod ui;

pub use api::{ScheduleData, ScheduleSource};
pub use config::Config;
pub use layout::{RenderMode, RenderState, Schedule};
