//! Grid layout: the whole day on one landscape page.
//!
//! Columns are a leading time column plus one column per room (sorted by
//! code). Three header rows carry the room labels, advisors and graders; each
//! distinct time label observed in any room becomes one body row. Labels are
//! printed shortened to their start time.
//!
//! ## Row Order
//!
//! Body rows are sorted by start time. A label without a clock time (e.g.
//! "Lunch Break") takes the start time of the slot before it in the room where
//! it first appears, so it stays next to its neighbours; ties keep first-seen
//! order.
//!
//! ## Fitting
//!
//! Text starts at 10pt and shrinks in half-point steps until the table fits
//! the page height (floor 5pt; below that the table runs off the page).

use super::canvas::{PdfCanvas, Rgb, LETTER_LANDSCAPE};
use super::text::{text_width, wrap_text, Font};
use super::{shorten_time, start_minutes, RenderOptions};
use crate::schedule::ScheduleMapping;
use crate::venue::VenueProfile;
use anyhow::Result;
use tracing::debug;

const MARGIN: f32 = 36.0;
const CELL_PADDING: f32 = 3.0;
const LINE_WIDTH: f32 = 0.5;
const MAX_FONT: f32 = 10.0;
const MIN_FONT: f32 = 5.0;
const FONT_STEP: f32 = 0.5;
const TITLE_SIZE: f32 = 14.0;
const TITLE_SPACE: f32 = 24.0;

/// One body row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub time_label: String,
    /// Presenter text per room, in sorted room order; empty if the room has
    /// no slot with this label.
    pub cells: Vec<String>,
    pub highlighted: bool,
}

/// True if `text` mentions any break keyword, ignoring case.
pub fn is_break(text: &str, keywords: &[String]) -> bool {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|k| !k.is_empty() && text.contains(&k.to_lowercase()))
}

/// Body rows for the grid: one per distinct time label across all rooms.
pub fn grid_rows(rooms: &ScheduleMapping, venue: &VenueProfile) -> Vec<GridRow> {
    let sorted = rooms.sorted();

    // (label, sort minutes, first-seen index)
    let mut labels: Vec<(&str, u32, usize)> = Vec::new();
    for (_, record) in &sorted {
        let mut previous = 0;
        for entry in &record.schedule {
            let minutes = start_minutes(&entry.time_label).unwrap_or(previous);
            previous = minutes;
            if !labels.iter().any(|(l, _, _)| *l == entry.time_label) {
                let seen = labels.len();
                labels.push((entry.time_label.as_str(), minutes, seen));
            }
        }
    }
    labels.sort_by_key(|&(_, minutes, seen)| (minutes, seen));

    labels
        .into_iter()
        .map(|(label, _, _)| {
            let cells: Vec<String> = sorted
                .iter()
                .map(|(_, record)| {
                    record
                        .schedule
                        .iter()
                        .filter(|e| e.time_label == label)
                        .map(|e| e.presenter.as_str())
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .collect();
            let highlighted = cells.iter().any(|c| is_break(c, &venue.break_keywords));
            GridRow {
                time_label: label.to_string(),
                cells,
                highlighted,
            }
        })
        .collect()
}

/// A fully wrapped table at one font size.
struct Table {
    size: f32,
    col_widths: Vec<f32>,
    /// Wrapped lines per cell, row-major; header rows first.
    rows: Vec<Vec<Vec<String>>>,
    fonts: Vec<Font>,
    fills: Vec<Rgb>,
}

impl Table {
    fn leading(&self) -> f32 {
        self.size * 1.2
    }

    fn row_height(&self, row: usize) -> f32 {
        let lines = self.rows[row].iter().map(Vec::len).max().unwrap_or(1);
        lines as f32 * self.leading() + 2.0 * CELL_PADDING
    }

    fn height(&self) -> f32 {
        (0..self.rows.len()).map(|r| self.row_height(r)).sum()
    }
}

fn layout(
    header: &[Vec<String>],
    body: &[GridRow],
    size: f32,
    width: f32,
) -> Table {
    let time_width = body
        .iter()
        .map(|r| text_width(shorten_time(&r.time_label), Font::Bold, size))
        .fold(text_width("Time", Font::Bold, size), f32::max)
        + 2.0 * CELL_PADDING;
    let room_count = header[0].len().saturating_sub(1).max(1);
    let room_width = (width - time_width) / room_count as f32;
    let mut col_widths = vec![time_width];
    col_widths.extend(std::iter::repeat(room_width).take(header[0].len().saturating_sub(1)));

    let mut rows = Vec::new();
    let mut fonts = Vec::new();
    let mut fills = Vec::new();
    let wrap_row = |cells: &[String], font: Font| -> Vec<Vec<String>> {
        cells
            .iter()
            .zip(&col_widths)
            .map(|(text, w)| wrap_text(text, font, size, w - 2.0 * CELL_PADDING))
            .collect()
    };

    for (i, cells) in header.iter().enumerate() {
        let font = if i == 0 { Font::Bold } else { Font::Regular };
        rows.push(wrap_row(cells, font));
        fonts.push(font);
        fills.push(if i == 0 { Rgb::LIGHT_GREY } else { Rgb::WHITE_SMOKE });
    }
    for row in body {
        let mut cells = vec![shorten_time(&row.time_label).to_string()];
        cells.extend(row.cells.iter().cloned());
        rows.push(wrap_row(&cells, Font::Regular));
        fonts.push(Font::Regular);
        fills.push(if row.highlighted { Rgb::HIGHLIGHT } else { Rgb::WHITE });
    }

    Table {
        size,
        col_widths,
        rows,
        fonts,
        fills,
    }
}

/// Render the one-page grid document.
pub fn render(
    rooms: &ScheduleMapping,
    venue: &VenueProfile,
    opts: &RenderOptions,
) -> Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(LETTER_LANDSCAPE);
    let width = canvas.width() - 2.0 * MARGIN;
    let mut top = canvas.height() - MARGIN;

    if opts.include_title {
        let x = MARGIN + (width - text_width(&venue.title, Font::Bold, TITLE_SIZE)) / 2.0;
        canvas.text(x, top - TITLE_SIZE, Font::Bold, TITLE_SIZE, &venue.title);
        top -= TITLE_SPACE;
    }
    let available = top - MARGIN;

    let sorted = rooms.sorted();
    let mut labels = vec!["Time".to_string()];
    let mut advisors = vec![String::new()];
    let mut graders = vec![String::new()];
    for (room, record) in &sorted {
        labels.push(format!("Room {room}"));
        advisors.push(record.advisors.clone());
        graders.push(record.graders.clone());
    }
    let header = [labels, advisors, graders];
    let body = grid_rows(rooms, venue);

    let mut size = MAX_FONT;
    let mut table = layout(&header, &body, size, width);
    while table.height() > available && size > MIN_FONT {
        size -= FONT_STEP;
        table = layout(&header, &body, size, width);
    }
    debug!(font_size = size, rows = body.len(), "grid laid out");

    for row in 0..table.rows.len() {
        let height = table.row_height(row);
        let mut x = MARGIN;
        for (col, lines) in table.rows[row].iter().enumerate() {
            let w = table.col_widths[col];
            canvas.fill_rect(x, top - height, w, height, table.fills[row]);
            canvas.stroke_rect(x, top - height, w, height, LINE_WIDTH, Rgb::GRID_LINE);
            // Time column and room labels are bold.
            let font = if col == 0 { Font::Bold } else { table.fonts[row] };
            let mut y = top - CELL_PADDING - table.size;
            for line in lines {
                canvas.text(x + CELL_PADDING, y, font, table.size, line);
                y -= table.leading();
            }
            x += w;
        }
        top -= height;
    }

    canvas.finish()
}
