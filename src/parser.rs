//! # Parser — Flat Page Text to Per-Room Schedule
//!
//! Turns the trimmed, non-blank text lines of the symposium page into a
//! `ScheduleMapping` in a single left-to-right pass.
//!
//! ## Line Classes
//!
//! Each line is classified against the venue vocabulary in priority order:
//!
//! | Class | Test | Effect |
//! |-------|------|--------|
//! | Room header | exact match with a configured header | opens (or resets) the room |
//! | Combined | contains both markers | split at the graders marker |
//! | Advisors | contains the advisors marker | advisors = line |
//! | Graders | contains the graders marker | graders = line |
//! | Time range | contains `"am – "` or `"pm – "` | label; next usable line is the presenter |
//! | Other | anything else | ignored |
//!
//! Everything except room headers needs an open room. Matching is plain
//! substring/equality, so a name that happens to contain `"pm – "` is read as
//! a time label.
//!
//! ## Lookahead
//!
//! A time label consumes the lines up to and including its presenter through
//! the same `LineCursor` the outer loop reads from, so no line is classified
//! twice. Noise lines (`"Link downloads document"`) are skipped; if the input
//! ends first the presenter is empty.
//!
//! The parser never fails. Unexpected shapes leave fields empty or rooms
//! absent; callers that need stricter guarantees check the result.

use crate::schedule::{RoomId, ScheduleMapping, TimeSlotEntry};
use crate::venue::VenueProfile;
use tracing::debug;

/// Substrings that mark a time-range line. The dash is an en-dash.
pub const TIME_RANGE_TOKENS: [&str; 2] = ["am – ", "pm – "];

/// Classification of one line, before room context is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    RoomHeader(&'a str),
    Combined { advisors: &'a str, graders: &'a str },
    Advisors,
    Graders,
    TimeRange,
    Other,
}

/// Classify `line` against the venue vocabulary.
pub fn classify<'a>(line: &'a str, venue: &VenueProfile) -> LineKind<'a> {
    if let Some(code) = venue.room_code(line) {
        return LineKind::RoomHeader(code);
    }

    let has_advisors = line.contains(venue.advisors_marker.as_str());
    let has_graders = line.contains(venue.graders_marker.as_str());
    match (has_advisors, has_graders) {
        (true, true) => {
            // Both present, so the graders marker is found. Graders text stops
            // at a second graders marker, if any.
            let marker = venue.graders_marker.as_str();
            let split = line.find(marker).unwrap_or(0);
            let (advisors, tail) = line.split_at(split);
            let rest = &tail[marker.len()..];
            let end = rest.find(marker).unwrap_or(rest.len());
            LineKind::Combined {
                advisors,
                graders: &tail[..marker.len() + end],
            }
        }
        (true, false) => LineKind::Advisors,
        (false, true) => LineKind::Graders,
        (false, false) if is_time_range(line) => LineKind::TimeRange,
        (false, false) => LineKind::Other,
    }
}

/// True if `line` contains an am/pm en-dash separator.
pub fn is_time_range(line: &str) -> bool {
    TIME_RANGE_TOKENS.iter().any(|t| line.contains(t))
}

/// Read position over the line list, shared by the dispatch loop and the
/// presenter lookahead.
struct LineCursor<'a, S> {
    lines: &'a [S],
    pos: usize,
}

impl<'a, S: AsRef<str>> LineCursor<'a, S> {
    fn new(lines: &'a [S]) -> Self {
        LineCursor { lines, pos: 0 }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos)?.as_ref();
        self.pos += 1;
        Some(line)
    }

    /// Advance past blank and noise lines; return the first usable line.
    fn next_presenter_line(&mut self, noise: &str) -> Option<&'a str> {
        while let Some(line) = self.next_line() {
            if !line.is_empty() && line != noise {
                return Some(line);
            }
        }
        None
    }
}

/// Presenter name from a presenter line: everything before the cutoff text.
pub fn presenter_name<'a>(line: &'a str, cutoff: &str) -> &'a str {
    line.split(cutoff).next().unwrap_or(line)
}

/// Parse page lines into a schedule using the venue's vocabulary.
pub fn parse<S: AsRef<str>>(lines: &[S], venue: &VenueProfile) -> ScheduleMapping {
    let mut rooms = ScheduleMapping::new();
    let mut current_room: Option<RoomId> = None;
    let mut cursor = LineCursor::new(lines);

    while let Some(line) = cursor.next_line() {
        let kind = classify(line, venue);

        if let LineKind::RoomHeader(code) = kind {
            debug!(room = code, "room section");
            rooms.open_room(code);
            current_room = Some(code.to_string());
            continue;
        }

        // A header with an empty code opens its room but collects nothing.
        let Some(room) = current_room.as_deref().filter(|r| !r.is_empty()) else {
            continue;
        };
        let Some(record) = rooms.room_mut(room) else {
            continue;
        };

        match kind {
            LineKind::Combined { advisors, graders } => {
                record.advisors = advisors.to_string();
                record.graders = graders.to_string();
            }
            LineKind::Advisors => record.advisors = line.to_string(),
            LineKind::Graders => record.graders = line.to_string(),
            LineKind::TimeRange => {
                let presenter = cursor
                    .next_presenter_line(&venue.noise_line)
                    .map(|l| presenter_name(l, &venue.presenter_cutoff))
                    .unwrap_or("");
                record.schedule.push(TimeSlotEntry::new(line, presenter));
            }
            LineKind::RoomHeader(_) | LineKind::Other => {}
        }
    }

    debug!(
        rooms = rooms.len(),
        slots = rooms.slot_count(),
        "parsed schedule lines"
    );
    rooms
}
