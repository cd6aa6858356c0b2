//! # CLI Execution
//!
//! Kept apart from `main.rs` so the entry point stays flag parsing and
//! logging setup. Loads the venue, obtains the page lines, parses them and
//! hands the mapping to the selected output mode.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use symposium::{
    fetch::{self, FetchOptions},
    parser,
    render::{self, RenderOptions},
    venue::{self, VenueProfile},
    ScheduleMapping,
};
use tracing::info;

use super::Cli;

pub const DEFAULT_JSON_OUTPUT: &str = "symposium_schedule.json";
pub const DEFAULT_PDF_OUTPUT: &str = "symposium_schedule.pdf";
pub const DEFAULT_GRID_OUTPUT: &str = "symposium_grid.pdf";

pub fn run(cli: &Cli) -> Result<()> {
    let venue = match &cli.venue {
        Some(path) => venue::load_venue(path)?,
        None => VenueProfile::default(),
    };
    let source_url = fetch::resolve_source_url(cli.url.as_deref());

    let lines = load_lines(cli, &venue, &source_url)?;
    let rooms = parser::parse(&lines, &venue);
    info!(
        rooms = rooms.len(),
        slots = rooms.slot_count(),
        "schedule parsed"
    );

    if cli.hash {
        println!("{}", rooms.digest()?);
        return Ok(());
    }
    if cli.json {
        return write_json(cli, &rooms);
    }
    write_pdf(cli, &rooms, &venue, &source_url)
}

fn load_lines(cli: &Cli, venue: &VenueProfile, source_url: &str) -> Result<Vec<String>> {
    let opts = FetchOptions {
        maintenance_marker: venue.maintenance_marker.clone(),
        ..FetchOptions::default()
    };
    let html = match &cli.input {
        Some(path) => fetch::read_saved_page(path, &opts)?,
        None => fetch::fetch_raw_text(source_url, &opts)?,
    };
    Ok(fetch::page_lines(&html))
}

fn write_json(cli: &Cli, rooms: &ScheduleMapping) -> Result<()> {
    let json = rooms.to_json_pretty()?;
    let path = output_path(cli, DEFAULT_JSON_OUTPUT);
    write_output(&path, json.as_bytes())?;
    info!(path = %path.display(), "wrote JSON schedule");
    println!("{json}");
    Ok(())
}

fn write_pdf(
    cli: &Cli,
    rooms: &ScheduleMapping,
    venue: &VenueProfile,
    source_url: &str,
) -> Result<()> {
    let opts = RenderOptions {
        include_title: !cli.no_title,
        show_headers: cli.show_headers,
        qr_codes: cli.qr,
        keep_together: !cli.allow_breaks,
        grid: cli.grid,
        base_url: cli
            .base_url
            .clone()
            .unwrap_or_else(|| source_url.to_string()),
    };
    let bytes = render::render_pdf(rooms, venue, &opts)?;
    let default = if cli.grid {
        DEFAULT_GRID_OUTPUT
    } else {
        DEFAULT_PDF_OUTPUT
    };
    let path = output_path(cli, default);
    write_output(&path, &bytes)?;
    info!(path = %path.display(), "wrote PDF");
    println!("Saved {}", path.display());
    Ok(())
}

fn output_path(cli: &Cli, default: &str) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
