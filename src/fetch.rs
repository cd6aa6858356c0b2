//! # Fetch — Page Retrieval, Maintenance Check, Text Extraction
//!
//! Fetches the symposium page over blocking HTTP (ureq) and flattens its HTML
//! into the trimmed line list the parser consumes.
//!
//! ## Maintenance Mode
//!
//! When the site is down for maintenance it serves a placeholder page,
//! usually with a 503 status. The body is checked for the venue's maintenance
//! marker before the status code, so that case surfaces as the typed
//! `SourceUnavailable` error rather than a generic HTTP failure. The same check
//! runs on pages loaded from disk.
//!
//! ## Text Extraction
//!
//! `page_lines` concatenates the document's text nodes in order, leaving out
//! `script`, `style` and `template` contents, then splits on newlines, trims
//! and drops blank lines.

use anyhow::{Context, Result};
use scraper::{Html, Node};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default page address when neither `--url` nor `SYMPOSIUM_URL` is set.
pub const DEFAULT_SOURCE_URL: &str = "https://symposium.orfe.princeton.edu";

/// Environment variable overriding the page address.
pub const SOURCE_URL_ENV: &str = "SYMPOSIUM_URL";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Elements whose text never shows on the rendered page.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

const MAINTENANCE_MESSAGE: &str =
    "The symposium site is undergoing maintenance; the schedule is temporarily unavailable";

/// The source page reported that it is in maintenance mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnavailable {
    pub url: String,
    pub message: String,
}

impl std::fmt::Display for SourceUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.url)
    }
}

impl std::error::Error for SourceUnavailable {}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub maintenance_marker: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            maintenance_marker: crate::venue::VenueProfile::default().maintenance_marker,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Resolve the page URL from an explicit value, treating empty as unset.
pub fn resolve_source_url(explicit: Option<&str>) -> String {
    match explicit.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_SOURCE_URL.to_string(),
    }
}

/// Fail with `SourceUnavailable` if `content` carries the maintenance marker.
pub fn check_maintenance(content: &str, url: &str, marker: &str) -> Result<()> {
    if !marker.is_empty() && content.contains(marker) {
        warn!(url, "source page is in maintenance mode");
        return Err(SourceUnavailable {
            url: url.to_string(),
            message: MAINTENANCE_MESSAGE.to_string(),
        }
        .into());
    }
    Ok(())
}

/// GET the page and return its raw HTML.
pub fn fetch_raw_text(source_url: &str, opts: &FetchOptions) -> Result<String> {
    let agent = ureq::Agent::new_with_config(
        ureq::config::Config::builder()
            .timeout_global(Some(opts.timeout))
            .timeout_connect(Some(Duration::from_secs(10)))
            .http_status_as_error(false)
            .build(),
    );

    info!(url = source_url, "fetching schedule page");
    let mut response = agent
        .get(source_url)
        .header("User-Agent", USER_AGENT)
        .call()
        .with_context(|| format!("GET {source_url}"))?;
    let status = response.status();
    let body = response
        .body_mut()
        .read_to_string()
        .context("reading response body")?;

    check_maintenance(&body, source_url, &opts.maintenance_marker)?;
    if !status.is_success() {
        anyhow::bail!("GET {} returned HTTP {}", source_url, status);
    }
    info!(bytes = body.len(), status = status.as_u16(), "page fetched");
    Ok(body)
}

/// Read a saved page from disk, applying the same maintenance check.
pub fn read_saved_page(path: &Path, opts: &FetchOptions) -> Result<String> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("reading saved page {}", path.display()))?;
    check_maintenance(&body, &path.display().to_string(), &opts.maintenance_marker)?;
    info!(path = %path.display(), bytes = body.len(), "loaded saved page");
    Ok(body)
}

/// Visible text of an HTML document, split into trimmed non-blank lines.
pub fn page_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    split_lines(&text)
}

/// Split text on newlines, trim each piece and drop the blank ones.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
