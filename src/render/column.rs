//! Single-column layout: one section per room on portrait US Letter.
//!
//! The page is filled top to bottom with measured blocks. A room section is
//! the heading block (heading, advisors, graders, optional QR code) followed
//! by one block per table row. With `keep_together`, a section that does not
//! fit in the space left starts on a fresh page, unless it is taller than a
//! whole page, in which case it flows.

use super::canvas::{PdfCanvas, Rgb, LETTER};
use super::qr::{room_link, QrMatrix};
use super::text::{text_width, wrap_text, Font};
use super::RenderOptions;
use crate::schedule::{RoomRecord, ScheduleMapping};
use crate::venue::VenueProfile;
use anyhow::Result;
use tracing::debug;

const MARGIN: f32 = 72.0;

const TITLE_SIZE: f32 = 18.0;
const TITLE_LEADING: f32 = 22.0;
const TITLE_SPACE_AFTER: f32 = 18.0;

const HEADING_SIZE: f32 = 18.0;
const HEADING_LEADING: f32 = 22.0;
const HEADING_SPACE_BEFORE: f32 = 12.0;
const HEADING_SPACE_AFTER: f32 = 12.0;

const BODY_SIZE: f32 = 14.0;
const BODY_LEADING: f32 = 20.0;

const TABLE_COLUMN: f32 = 200.0;
const CELL_PADDING_X: f32 = 6.0;
const ROW_SIZE: f32 = 14.0;
const ROW_LEADING: f32 = 16.0;
const ROW_PADDING: f32 = 6.0;
const HEADER_SIZE: f32 = 16.0;
const HEADER_LEADING: f32 = 18.0;
const HEADER_PADDING_TOP: f32 = 3.0;
const HEADER_PADDING_BOTTOM: f32 = 12.0;

const QR_SIZE: f32 = 72.0;
const QR_GAP: f32 = 12.0;
const SECTION_SPACE_AFTER: f32 = 12.0;

/// Baseline for a line of `size` text centred in a `leading`-tall slot.
fn baseline(top: f32, leading: f32, size: f32) -> f32 {
    top - (leading + size * 0.7) / 2.0
}

/// One measured, indivisible piece of the page.
enum Block {
    Title(Vec<String>),
    RoomHead {
        heading: Vec<String>,
        body: Vec<String>,
        qr: Option<QrMatrix>,
    },
    Row {
        cells: [Vec<String>; 2],
        header: bool,
        shade: Rgb,
        last: bool,
    },
}

impl Block {
    fn height(&self) -> f32 {
        match self {
            Block::Title(lines) => lines.len() as f32 * TITLE_LEADING + TITLE_SPACE_AFTER,
            Block::RoomHead { heading, body, qr } => {
                let text = heading.len() as f32 * HEADING_LEADING
                    + HEADING_SPACE_AFTER
                    + body.len() as f32 * BODY_LEADING;
                let qr_height = if qr.is_some() {
                    QR_SIZE + HEADING_SPACE_AFTER
                } else {
                    0.0
                };
                HEADING_SPACE_BEFORE + text.max(qr_height) + 6.0
            }
            Block::Row { cells, header, last, .. } => {
                let lines = cells[0].len().max(cells[1].len()) as f32;
                let row = if *header {
                    lines * HEADER_LEADING + HEADER_PADDING_TOP + HEADER_PADDING_BOTTOM
                } else {
                    lines * ROW_LEADING + 2.0 * ROW_PADDING
                };
                if *last {
                    row + SECTION_SPACE_AFTER
                } else {
                    row
                }
            }
        }
    }

    fn draw(&self, canvas: &mut PdfCanvas, top: f32) {
        let frame_width = canvas.width() - 2.0 * MARGIN;
        match self {
            Block::Title(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    let width = text_width(line, Font::Bold, TITLE_SIZE);
                    let x = MARGIN + (frame_width - width) / 2.0;
                    let slot = top - i as f32 * TITLE_LEADING;
                    let y = baseline(slot, TITLE_LEADING, TITLE_SIZE);
                    canvas.text(x, y, Font::Bold, TITLE_SIZE, line);
                }
            }
            Block::RoomHead { heading, body, qr } => {
                let mut y = top - HEADING_SPACE_BEFORE;
                if let Some(qr) = qr {
                    qr.draw(canvas, MARGIN + frame_width - QR_SIZE, y, QR_SIZE);
                }
                for line in heading {
                    let base = baseline(y, HEADING_LEADING, HEADING_SIZE);
                    canvas.text(MARGIN, base, Font::Bold, HEADING_SIZE, line);
                    y -= HEADING_LEADING;
                }
                y -= HEADING_SPACE_AFTER;
                for line in body {
                    let base = baseline(y, BODY_LEADING, BODY_SIZE);
                    canvas.text(MARGIN, base, Font::Regular, BODY_SIZE, line);
                    y -= BODY_LEADING;
                }
            }
            Block::Row { cells, header, shade, last } => {
                let table_left = MARGIN + (frame_width - 2.0 * TABLE_COLUMN) / 2.0;
                let mut row_height = self.height();
                if *last {
                    row_height -= SECTION_SPACE_AFTER;
                }
                let table_width = 2.0 * TABLE_COLUMN;
                canvas.fill_rect(table_left, top - row_height, table_width, row_height, *shade);

                let (font, size, leading, pad_top) = if *header {
                    (Font::Bold, HEADER_SIZE, HEADER_LEADING, HEADER_PADDING_TOP)
                } else {
                    (Font::Regular, ROW_SIZE, ROW_LEADING, ROW_PADDING)
                };
                for (col, lines) in cells.iter().enumerate() {
                    let x = table_left + col as f32 * TABLE_COLUMN + CELL_PADDING_X;
                    let mut y = top - pad_top;
                    for line in lines {
                        canvas.text(x, baseline(y, leading, size), font, size, line);
                        y -= leading;
                    }
                }
            }
        }
    }
}

/// Blocks for one room, heading first.
fn room_blocks(
    room: &str,
    record: &RoomRecord,
    venue: &VenueProfile,
    opts: &RenderOptions,
    frame_width: f32,
) -> Result<Vec<Block>> {
    let qr = if opts.qr_codes {
        Some(QrMatrix::encode(&room_link(&opts.base_url, room)?)?)
    } else {
        None
    };
    let wrap_width = if qr.is_some() {
        frame_width - QR_SIZE - QR_GAP
    } else {
        frame_width
    };

    let heading = wrap_text(
        &format!("Room {} - {}", room, venue.building),
        Font::Bold,
        HEADING_SIZE,
        wrap_width,
    );
    let mut body = Vec::new();
    for field in [&record.advisors, &record.graders] {
        if !field.is_empty() {
            body.extend(wrap_text(field, Font::Regular, BODY_SIZE, wrap_width));
        }
    }

    let mut blocks = vec![Block::RoomHead { heading, body, qr }];

    let cell_width = TABLE_COLUMN - 2.0 * CELL_PADDING_X;
    let mut rows: Vec<([&str; 2], bool)> = Vec::new();
    if opts.show_headers {
        rows.push((["Time", "Presenter"], true));
    }
    for entry in &record.schedule {
        rows.push(([entry.time_label.as_str(), entry.presenter.as_str()], false));
    }

    let data_offset = usize::from(opts.show_headers);
    let count = rows.len();
    for (i, (cells, header)) in rows.into_iter().enumerate() {
        let (font, size) = if header {
            (Font::Bold, HEADER_SIZE)
        } else {
            (Font::Regular, ROW_SIZE)
        };
        let shade = if header {
            Rgb::LIGHT_GREY
        } else if (i - data_offset) % 2 == 0 {
            Rgb::WHITE
        } else {
            Rgb::WHITE_SMOKE
        };
        blocks.push(Block::Row {
            cells: cells.map(|c| wrap_text(c, font, size, cell_width)),
            header,
            shade,
            last: i + 1 == count,
        });
    }
    Ok(blocks)
}

/// Lay `blocks` out from the current position, breaking pages as needed.
struct Flow {
    canvas: PdfCanvas,
    cursor: f32,
}

impl Flow {
    fn new() -> Self {
        let canvas = PdfCanvas::new(LETTER);
        let cursor = canvas.height() - MARGIN;
        Flow { canvas, cursor }
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= self.canvas.height() - MARGIN
    }

    fn remaining(&self) -> f32 {
        self.cursor - MARGIN
    }

    fn frame_height(&self) -> f32 {
        self.canvas.height() - 2.0 * MARGIN
    }

    fn break_page(&mut self) {
        self.canvas.new_page();
        self.cursor = self.canvas.height() - MARGIN;
    }

    fn place(&mut self, block: &Block) {
        let height = block.height();
        if height > self.remaining() && !self.at_page_top() {
            self.break_page();
        }
        block.draw(&mut self.canvas, self.cursor);
        self.cursor -= height;
    }

    fn place_group(&mut self, blocks: &[Block], keep_together: bool) {
        if keep_together {
            let total: f32 = blocks.iter().map(Block::height).sum();
            if total > self.remaining() && total <= self.frame_height() && !self.at_page_top() {
                self.break_page();
            }
        }
        for block in blocks {
            self.place(block);
        }
    }
}

/// Render the single-column document.
pub fn render(
    rooms: &ScheduleMapping,
    venue: &VenueProfile,
    opts: &RenderOptions,
) -> Result<Vec<u8>> {
    let mut flow = Flow::new();
    let frame_width = flow.canvas.width() - 2.0 * MARGIN;

    if opts.include_title {
        let title = wrap_text(&venue.title, Font::Bold, TITLE_SIZE, frame_width);
        flow.place(&Block::Title(title));
    }

    for (room, record) in rooms.sorted() {
        let blocks = room_blocks(room, record, venue, opts, frame_width)?;
        flow.place_group(&blocks, opts.keep_together);
    }

    debug!(pages = flow.canvas.page_count(), rooms = rooms.len(), "column layout done");
    flow.canvas.finish()
}
