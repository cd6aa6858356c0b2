//! Text measurement and encoding for the standard Helvetica faces.
//!
//! PDFs here use the base-14 Type1 fonts with WinAnsiEncoding, so nothing is
//! embedded. Widths come from the Adobe Helvetica / Helvetica-Bold AFM files
//! (units of 1/1000 em) for printable ASCII; other WinAnsi glyphs fall back to
//! a few known widths or the digit width.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name used in page content streams.
    pub fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

// Printable ASCII 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(ch: char, font: Font) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        '\u{a0}' => 278,
        '–' => 556,
        '—' | '…' | '‰' => 1000,
        '•' => 350,
        '‘' | '’' => match font {
            Font::Regular => 222,
            Font::Bold => 278,
        },
        '“' | '”' => match font {
            Font::Regular => 333,
            Font::Bold => 500,
        },
        _ => 556,
    }
}

/// Width of `text` in points at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, font) as u32).sum();
    units as f32 * size / 1000.0
}

/// Encode `text` as WinAnsi bytes. Characters outside the code page become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

/// Greedy word wrap to `max_width` points. Words wider than a line are split
/// by character. Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font, size) <= max_width {
            current = word.to_string();
            continue;
        }
        for ch in word.chars() {
            current.push(ch);
            if text_width(&current, font, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_afm_samples() {
        assert_eq!(text_width(" ", Font::Regular, 1000.0), 278.0);
        assert_eq!(text_width("W", Font::Regular, 1000.0), 944.0);
        assert_eq!(text_width("i", Font::Regular, 1000.0), 222.0);
        assert_eq!(text_width("i", Font::Bold, 1000.0), 278.0);
        assert_eq!(text_width("~", Font::Bold, 1000.0), 584.0);
        assert!((text_width("Hello", Font::Regular, 10.0) - 22.78).abs() < 1e-3);
    }

    #[test]
    fn win_ansi_maps_typographic_punctuation() {
        assert_eq!(win_ansi("9:00 am – 9:15 am")[8], 0x96);
        assert_eq!(win_ansi("“Café”"), vec![0x93, b'C', b'a', b'f', 0xe9, 0x94]);
        assert_eq!(win_ansi("Zoë 你"), vec![b'Z', b'o', 0xeb, b' ', b'?']);
    }

    #[test]
    fn wrap_breaks_on_words() {
        let text = "ORFE Advisors: A. Smith, B. Jones, C. Diaz";
        let lines = wrap_text(text, Font::Regular, 14.0, 150.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Regular, 14.0) <= 150.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_text("Supercalifragilistic", Font::Bold, 12.0, 40.0);
        assert!(lines.len() > 2);
        assert_eq!(lines.concat(), "Supercalifragilistic");
    }

    #[test]
    fn wrap_empty_text_is_one_blank_line() {
        assert_eq!(wrap_text("", Font::Regular, 10.0, 100.0), vec![String::new()]);
        assert_eq!(wrap_text("   ", Font::Regular, 10.0, 100.0), vec![String::new()]);
    }
}
