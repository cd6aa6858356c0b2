pub mod fetch;
pub mod parser;
pub mod render;
pub mod schedule;
pub mod venue;

pub use fetch::{page_lines, FetchOptions, SourceUnavailable};
pub use parser::parse;
pub use render::{render_pdf, shorten_time, RenderOptions};
pub use schedule::{RoomId, RoomRecord, ScheduleMapping, TimeSlotEntry};
pub use venue::VenueProfile;
