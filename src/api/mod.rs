mod types;
mod client;
mod format;
mod time;

pub use types::*;
pub use client::{parse_schedule, ScheduleClient, ScheduleSource, SourceError};
pub use format::{format_details, DETAILS_COMING_SOON};
pub use time::{format_time_range, TimePoint};
