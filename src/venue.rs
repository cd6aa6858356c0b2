//! # Venue — Page Vocabulary for One Symposium
//!
//! The parser recognizes rooms, advisor lines and grader lines by literal
//! strings that belong to one particular event page. Those strings live in a
//! `VenueProfile` instead of the parser so a different venue (or next year's
//! room list) only needs a TOML file:
//!
//! ```toml
//! title = "Class of 2027 ORFE Thesis Symposium Schedule"
//! building = "Sherrerd Hall"
//! room_headers = ["001 - Sherrerd Hall", "101 - Sherrerd Hall"]
//! break_keywords = ["break", "lunch"]
//! ```
//!
//! Every field is optional; missing ones fall back to the ORFE defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Separator between the room code and the building name in a room header.
pub const ROOM_HEADER_SEPARATOR: &str = " - ";

const DEFAULT_ROOM_CODES: [&str; 7] = ["001", "003", "101", "107", "110", "123", "125"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueProfile {
    /// Document title printed at the top of the single-column PDF.
    pub title: String,
    /// Building name used in PDF room headings.
    pub building: String,
    /// Exact lines that open a room section, `"<code> - <building>"`.
    pub room_headers: Vec<String>,
    pub advisors_marker: String,
    pub graders_marker: String,
    /// Line emitted by the page for attachment links; never a presenter.
    pub noise_line: String,
    /// Presenter lines are cut at the first occurrence of this text.
    pub presenter_cutoff: String,
    /// Substring whose presence means the page is in maintenance mode.
    pub maintenance_marker: String,
    /// Grid rows whose presenter text contains one of these are highlighted.
    pub break_keywords: Vec<String>,
}

impl Default for VenueProfile {
    fn default() -> Self {
        let building = "Sherrerd Hall".to_string();
        VenueProfile {
            title: "Class of 2026 ORFE Thesis Symposium Schedule".to_string(),
            room_headers: DEFAULT_ROOM_CODES
                .iter()
                .map(|code| format!("{code}{ROOM_HEADER_SEPARATOR}{building}"))
                .collect(),
            building,
            advisors_marker: "ORFE Advisors:".to_string(),
            graders_marker: "PhD Candidate Graders:".to_string(),
            noise_line: "Link downloads document".to_string(),
            presenter_cutoff: " Link".to_string(),
            maintenance_marker: "Briefly unavailable for scheduled maintenance".to_string(),
            break_keywords: ["break", "lunch", "coffee", "recess"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl VenueProfile {
    /// Room code for `line` if it is exactly one of the configured headers.
    pub fn room_code<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !self.room_headers.iter().any(|h| h == line) {
            return None;
        }
        line.split(ROOM_HEADER_SEPARATOR).next()
    }

    /// Room codes of every configured header, in configuration order.
    pub fn room_codes(&self) -> Vec<&str> {
        self.room_headers
            .iter()
            .filter_map(|h| h.split(ROOM_HEADER_SEPARATOR).next())
            .collect()
    }

    /// Check the profile can drive the parser at all.
    pub fn validate(&self) -> Result<()> {
        if self.room_headers.is_empty() {
            anyhow::bail!("venue.room_headers must list at least one room");
        }
        for header in &self.room_headers {
            if !header.contains(ROOM_HEADER_SEPARATOR) {
                anyhow::bail!(
                    "room header {:?} must look like \"<code>{}<building>\"",
                    header,
                    ROOM_HEADER_SEPARATOR
                );
            }
        }
        if self.advisors_marker.is_empty() || self.graders_marker.is_empty() {
            anyhow::bail!("venue.advisors_marker and venue.graders_marker must be non-empty");
        }
        if self.presenter_cutoff.is_empty() {
            anyhow::bail!("venue.presenter_cutoff must be non-empty");
        }
        Ok(())
    }
}

/// Parse and validate a venue profile from TOML text.
pub fn parse_venue(content: &str) -> Result<VenueProfile> {
    let venue: VenueProfile = toml::from_str(content)?;
    venue.validate()?;
    Ok(venue)
}

/// Load a venue profile from a TOML file.
pub fn load_venue(path: &Path) -> Result<VenueProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading venue file {}", path.display()))?;
    parse_venue(&content).with_context(|| format!("invalid venue file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_lists_sherrerd_rooms() {
        let venue = VenueProfile::default();
        assert_eq!(venue.room_headers.len(), 7);
        assert!(venue.room_headers.contains(&"101 - Sherrerd Hall".to_string()));
        assert_eq!(
            venue.room_codes(),
            vec!["001", "003", "101", "107", "110", "123", "125"]
        );
        venue.validate().unwrap();
    }

    #[test]
    fn room_code_requires_exact_header() {
        let venue = VenueProfile::default();
        assert_eq!(venue.room_code("107 - Sherrerd Hall"), Some("107"));
        assert_eq!(venue.room_code("107 - Sherrerd Hall "), None);
        assert_eq!(venue.room_code("999 - Sherrerd Hall"), None);
        assert_eq!(venue.room_code("Room 107"), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let venue = parse_venue(
            r#"
            building = "Friend Center"
            room_headers = ["006 - Friend Center", "008 - Friend Center"]
            "#,
        )
        .unwrap();
        assert_eq!(venue.building, "Friend Center");
        assert_eq!(venue.room_codes(), vec!["006", "008"]);
        assert_eq!(venue.noise_line, "Link downloads document");
        assert_eq!(venue.advisors_marker, "ORFE Advisors:");
    }

    #[test]
    fn header_without_separator_is_rejected() {
        let err = parse_venue(r#"room_headers = ["Room 6"]"#).unwrap_err();
        assert!(err.to_string().contains("Room 6"));
    }

    #[test]
    fn empty_room_list_is_rejected() {
        assert!(parse_venue("room_headers = []").is_err());
    }

    #[test]
    fn empty_marker_is_rejected() {
        assert!(parse_venue(r#"graders_marker = """#).is_err());
    }

    #[test]
    fn load_venue_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_venue(&dir.path().join("missing.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }

    #[test]
    fn load_venue_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venue.toml");
        std::fs::write(&path, "title = \"Spring Symposium\"\n").unwrap();
        let venue = load_venue(&path).unwrap();
        assert_eq!(venue.title, "Spring Symposium");
        assert_eq!(venue.room_headers, VenueProfile::default().room_headers);
    }
}
