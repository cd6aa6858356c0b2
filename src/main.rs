//! # Main — CLI Entry Point
//!
//! Fetches the symposium page (or reads a saved copy), parses it into a
//! per-room schedule and emits one of: a change-detection hash, the JSON
//! schedule, or a printable PDF.
//!
//! ## Modes
//!
//! - `--hash`: print the SHA-256 of the key-sorted JSON and exit. No files.
//! - `--json`: write the indented JSON schedule and echo it to stdout.
//! - default: render a PDF (`--grid` for the one-page landscape grid).
//!
//! ## Configuration
//!
//! - `--url` / `SYMPOSIUM_URL`: page address (empty means the default).
//! - `--input`: parse a saved HTML page instead of fetching.
//! - `--venue`: TOML venue profile overriding room headers and markers.
//! - `LOG_FORMAT=json`: JSON logs; `RUST_LOG` sets the filter.
//!
//! Exits 1 with a message when the site is in maintenance mode.

mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use symposium::SourceUnavailable;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "symposium-schedule",
    about = "Scrape the thesis symposium page into a per-room schedule"
)]
struct Cli {
    /// Print the SHA-256 hash of the schedule (for change detection) and exit
    #[arg(long)]
    hash: bool,

    /// Write the schedule as JSON and print it to stdout
    #[arg(long)]
    json: bool,

    /// Add a bold "Time / Presenter" header row to each room table
    #[arg(long)]
    show_headers: bool,

    /// Omit the document title
    #[arg(long)]
    no_title: bool,

    /// Add a QR code per room linking back to the page
    #[arg(long)]
    qr: bool,

    /// Render every room on one landscape page
    #[arg(long)]
    grid: bool,

    /// Let a room's table break across pages
    #[arg(long)]
    allow_breaks: bool,

    /// Symposium page URL (or set SYMPOSIUM_URL; empty means the default)
    #[arg(long, env = "SYMPOSIUM_URL")]
    url: Option<String>,

    /// Parse a saved HTML page instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file (defaults depend on the mode)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// TOML venue profile with room headers and markers
    #[arg(long)]
    venue: Option<PathBuf>,

    /// Base URL for QR code links (defaults to the page URL)
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers; human-readable on stderr otherwise.
    // Both keep stdout free for JSON and hash output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match cli::run(&cli) {
        Err(err) => match err.downcast_ref::<SourceUnavailable>() {
            Some(unavailable) => {
                error!(url = %unavailable.url, "schedule unavailable");
                eprintln!("{unavailable}");
                std::process::exit(1);
            }
            None => Err(err),
        },
        ok => ok,
    }
}
