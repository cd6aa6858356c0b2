//! # Render — Printable Schedules
//!
//! Lays a `ScheduleMapping` out as PDF. Two layouts:
//!
//! - **Column** (`column`): portrait US Letter, one section per room with a
//!   heading, the advisor/grader lines and a time/presenter table.
//! - **Grid** (`grid`): one landscape page, one column per room, one row per
//!   distinct time slot, break rows highlighted.
//!
//! Rooms always appear in lexicographic order of their code; slots keep the
//! order the parser produced. Renderers only borrow the mapping.

pub mod canvas;
pub mod column;
pub mod grid;
pub mod qr;
pub mod text;

use crate::fetch::DEFAULT_SOURCE_URL;
use crate::schedule::ScheduleMapping;
use crate::venue::VenueProfile;
use anyhow::Result;
use tracing::info;

/// Separators tried, in order, when cutting a time label down to its start.
pub const TIME_SEPARATORS: [&str; 4] = [" – ", " - ", "–", "-"];

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub include_title: bool,
    /// Bold "Time / Presenter" header row on each room table.
    pub show_headers: bool,
    pub qr_codes: bool,
    /// Start a room on a new page rather than split it across pages.
    pub keep_together: bool,
    pub grid: bool,
    /// Page address the QR codes point at.
    pub base_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            include_title: true,
            show_headers: false,
            qr_codes: false,
            keep_together: true,
            grid: false,
            base_url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

/// Render the schedule with the layout selected in `opts`.
pub fn render_pdf(
    rooms: &ScheduleMapping,
    venue: &VenueProfile,
    opts: &RenderOptions,
) -> Result<Vec<u8>> {
    let bytes = if opts.grid {
        grid::render(rooms, venue, opts)?
    } else {
        column::render(rooms, venue, opts)?
    };
    info!(
        layout = if opts.grid { "grid" } else { "column" },
        rooms = rooms.len(),
        bytes = bytes.len(),
        "rendered PDF"
    );
    Ok(bytes)
}

/// Start time of a slot label: the text before the first matching separator.
///
/// `"9:00 am – 9:15 am"` becomes `"9:00 am"`; labels without a separator are
/// returned unchanged.
pub fn shorten_time(label: &str) -> &str {
    TIME_SEPARATORS
        .iter()
        .find_map(|sep| label.split_once(sep).map(|(start, _)| start))
        .unwrap_or(label)
}

/// Minutes after midnight of a label's start time, if it reads as one.
///
/// Accepts `"9:00 am"`, `"12:30 pm"`, `"9 am"` (any case, optional space).
pub fn start_minutes(label: &str) -> Option<u32> {
    let start = shorten_time(label).trim().to_ascii_lowercase();
    let (clock, pm) = if let Some(rest) = start.strip_suffix("am") {
        (rest.trim_end(), false)
    } else if let Some(rest) = start.strip_suffix("pm") {
        (rest.trim_end(), true)
    } else {
        return None;
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (clock.parse::<u32>().ok()?, 0),
    };
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(hour * 60 + minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_time_keeps_start() {
        assert_eq!(shorten_time("9:00 am – 9:15 am"), "9:00 am");
        assert_eq!(shorten_time("9:00 am - 9:15 am"), "9:00 am");
        assert_eq!(shorten_time("9:00am–9:15am"), "9:00am");
        assert_eq!(shorten_time("9:00-9:15"), "9:00");
    }

    #[test]
    fn shorten_time_without_separator_is_unchanged() {
        assert_eq!(shorten_time("Lunch in Atrium"), "Lunch in Atrium");
        assert_eq!(shorten_time(""), "");
    }

    #[test]
    fn shorten_time_prefers_earlier_pattern() {
        // " - " is listed before the bare en-dash, so it wins even though the
        // en-dash occurs first in the text.
        assert_eq!(shorten_time("Q&A–panel - wrap"), "Q&A–panel");
    }

    #[test]
    fn start_minutes_parses_clock_times() {
        assert_eq!(start_minutes("9:00 am – 9:15 am"), Some(540));
        assert_eq!(start_minutes("12:15 pm – 12:30 pm"), Some(735));
        assert_eq!(start_minutes("12:05 am"), Some(5));
        assert_eq!(start_minutes("1 PM"), Some(780));
        assert_eq!(start_minutes("Lunch Break"), None);
        assert_eq!(start_minutes("13:00 pm"), None);
    }

    #[test]
    fn default_options_keep_rooms_together() {
        let opts = RenderOptions::default();
        assert!(opts.keep_together && opts.include_title);
        assert!(!opts.grid && !opts.qr_codes && !opts.show_headers);
    }
}
