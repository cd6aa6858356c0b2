//! Minimal page canvas over `lopdf`.
//!
//! Collects drawing operations per page (PDF user space: origin bottom-left,
//! units of 1/72 inch) and assembles a complete document on `finish`. Output
//! is deterministic: no creation dates, no document IDs.

use super::text::{win_ansi, Font};
use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

pub const LETTER: (f32, f32) = (612.0, 792.0);
pub const LETTER_LANDSCAPE: (f32, f32) = (792.0, 612.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
    pub const LIGHT_GREY: Rgb = Rgb(0.827, 0.827, 0.827);
    pub const WHITE_SMOKE: Rgb = Rgb(0.961, 0.961, 0.961);
    pub const GRID_LINE: Rgb = Rgb(0.6, 0.6, 0.6);
    pub const HIGHLIGHT: Rgb = Rgb(1.0, 0.949, 0.8);

    fn operands(self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

pub struct PdfCanvas {
    width: f32,
    height: f32,
    pages: Vec<Vec<Operation>>,
}

impl PdfCanvas {
    /// A canvas with one empty page of `size` (width, height).
    pub fn new(size: (f32, f32)) -> Self {
        PdfCanvas {
            width: size.0,
            height: size.1,
            pages: vec![Vec::new()],
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` starts non-empty and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Draw `text` with its baseline starting at (x, y).
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("rg", Rgb::BLACK.operands()));
        ops.push(Operation::new(
            "Tf",
            vec![font.resource().into(), size.into()],
        ));
        ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi(text), StringFormat::Hexadecimal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Fill an axis-aligned rectangle whose lower-left corner is (x, y).
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("rg", color.operands()));
        ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Stroke the outline of a rectangle.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line_width: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("RG", color.operands()));
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new(
            "re",
            vec![x.into(), y.into(), w.into(), h.into()],
        ));
        ops.push(Operation::new("S", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Assemble the PDF and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in [Font::Regular, Font::Bold] {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), self.width.into(), self.height.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buf = Vec::new();
        doc.save_to(&mut buf)?;
        Ok(buf)
    }
}
