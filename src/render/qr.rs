//! QR codes linking each printed room section back to the live page.

use super::canvas::{PdfCanvas, Rgb};
use anyhow::{Context, Result};
use qrcode::{Color, QrCode};
use url::Url;

/// Quiet zone around the symbol, in modules.
const QUIET_ZONE: usize = 2;

/// URL encoded in a room's QR code: the page address with a `#room-<code>` anchor.
pub fn room_link(base_url: &str, room: &str) -> Result<String> {
    let mut url = Url::parse(base_url).with_context(|| format!("invalid base URL {base_url:?}"))?;
    url.set_fragment(Some(&format!("room-{room}")));
    Ok(url.to_string())
}

/// Module grid of an encoded QR symbol.
#[derive(Debug, Clone)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(payload: &str) -> Result<Self> {
        let code = QrCode::new(payload.as_bytes())
            .with_context(|| format!("encoding QR payload {payload:?}"))?;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(QrMatrix {
            width: code.width(),
            dark,
        })
    }

    /// Modules per side, excluding the quiet zone.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// Draw the symbol as a `size` square whose top-left corner is (x, top).
    pub fn draw(&self, canvas: &mut PdfCanvas, x: f32, top: f32, size: f32) {
        let modules = self.width + 2 * QUIET_ZONE;
        let cell = size / modules as f32;
        canvas.fill_rect(x, top - size, size, size, Rgb::WHITE);

        for row in 0..self.width {
            let y = top - (row + QUIET_ZONE + 1) as f32 * cell;
            let mut col = 0;
            while col < self.width {
                if !self.is_dark(col, row) {
                    col += 1;
                    continue;
                }
                let start = col;
                while col < self.width && self.is_dark(col, row) {
                    col += 1;
                }
                let left = x + (start + QUIET_ZONE) as f32 * cell;
                canvas.fill_rect(left, y, (col - start) as f32 * cell, cell, Rgb::BLACK);
            }
        }
    }
}
