//! # Schedule — Parsed Per-Room Data and Its Serializations
//!
//! `ScheduleMapping` is the single value passed from the parser to every
//! renderer. It remembers the order in which rooms were first recognized (the
//! JSON file keeps that order) and offers a lexicographically sorted view for
//! everything else.
//!
//! ## Change-Detection Digest
//!
//! `digest()` hashes a canonical, key-sorted JSON encoding with SHA-256. The
//! canonical encoding uses `", "` / `": "` separators and escapes every
//! non-ASCII character as `\uXXXX`: byte-for-byte the layout of Python's
//! `json.dumps(obj, sort_keys=True)`, so digests published by earlier tooling
//! still match unchanged data.
//!
//! The indented file output escapes the same way, so it matches
//! `json.dumps(obj, indent=2)` byte for byte.

use anyhow::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io;

pub type RoomId = String;

/// One scheduled slot: a free-form time label and the presenter found after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotEntry {
    pub time_label: String,
    pub presenter: String,
}

impl TimeSlotEntry {
    pub fn new(time_label: impl Into<String>, presenter: impl Into<String>) -> Self {
        TimeSlotEntry {
            time_label: time_label.into(),
            presenter: presenter.into(),
        }
    }
}

// Serialized as a two-element array: ["9:00 am – 9:15 am", "Alice Lee"].
impl Serialize for TimeSlotEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.time_label, &self.presenter).serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomRecord {
    pub advisors: String,
    pub graders: String,
    pub schedule: Vec<TimeSlotEntry>,
}

/// Room code → record, in first-recognized order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleMapping {
    rooms: Vec<(RoomId, RoomRecord)>,
}

impl ScheduleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the section for `room`.
    ///
    /// A room seen again gets an empty record but keeps its original position.
    pub(crate) fn open_room(&mut self, room: &str) -> &mut RoomRecord {
        let idx = match self.rooms.iter().position(|(id, _)| id == room) {
            Some(idx) => {
                self.rooms[idx].1 = RoomRecord::default();
                idx
            }
            None => {
                self.rooms.push((room.to_string(), RoomRecord::default()));
                self.rooms.len() - 1
            }
        };
        &mut self.rooms[idx].1
    }

    pub(crate) fn room_mut(&mut self, room: &str) -> Option<&mut RoomRecord> {
        self.rooms
            .iter_mut()
            .find(|(id, _)| id == room)
            .map(|(_, record)| record)
    }

    pub fn get(&self, room: &str) -> Option<&RoomRecord> {
        self.rooms
            .iter()
            .find(|(id, _)| id == room)
            .map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Total number of time slots across all rooms.
    pub fn slot_count(&self) -> usize {
        self.rooms.iter().map(|(_, r)| r.schedule.len()).sum()
    }

    /// Rooms in the order they were first recognized.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoomRecord)> {
        self.rooms.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Rooms ordered lexicographically by room code.
    pub fn sorted(&self) -> Vec<(&str, &RoomRecord)> {
        let mut rooms: Vec<_> = self.iter().collect();
        rooms.sort_by(|a, b| a.0.cmp(b.0));
        rooms
    }

    /// Indented JSON (two spaces, ASCII-escaped), rooms in first-recognized order.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = AsciiPrettyFormatter::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Key-sorted JSON in the canonical digest layout.
    pub fn canonical_json(&self) -> Result<String> {
        let sorted: BTreeMap<&str, &RoomRecord> = self.iter().collect();
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
        sorted.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }

    /// Lowercase hex SHA-256 of `canonical_json()`.
    pub fn digest(&self) -> Result<String> {
        Ok(sha256_hex(&self.canonical_json()?))
    }
}

impl Serialize for ScheduleMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rooms.len()))?;
        for (id, record) in &self.rooms {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

/// Compute SHA-256 hex digest of a string.
fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Single-line JSON with spaced separators and ASCII-only string bodies.
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        write_ascii_fragment(writer, fragment)
    }
}

/// Printable ASCII as is; everything else as `\uXXXX` UTF-16 units.
fn write_ascii_fragment<W: ?Sized + io::Write>(writer: &mut W, fragment: &str) -> io::Result<()> {
    for ch in fragment.chars() {
        if (' '..='~').contains(&ch) {
            writer.write_all(&[ch as u8])?;
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
        }
    }
    Ok(())
}

/// serde_json's two-space pretty layout with ASCII-only string bodies.
struct AsciiPrettyFormatter<'a>(PrettyFormatter<'a>);

impl AsciiPrettyFormatter<'_> {
    fn new() -> Self {
        AsciiPrettyFormatter(PrettyFormatter::with_indent(b"  "))
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        write_ascii_fragment(writer, fragment)
    }
}
