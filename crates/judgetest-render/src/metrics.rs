//! Helvetica glyph metrics and word wrapping.
//!
//! Widths are the standard Adobe AFM advance widths for printable ASCII,
//! in thousandths of the font size.

use judgetest_core::normalize::winansi_byte;

/// Width used for WinAnsi characters above ASCII.
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// The three faces of the standard Helvetica family used on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    /// PDF base font name.
    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name the page content refers to.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Oblique => "F3",
        }
    }

    fn table(&self) -> &'static [u16; 95] {
        match self {
            FontStyle::Bold => &HELVETICA_BOLD,
            FontStyle::Regular | FontStyle::Oblique => &HELVETICA,
        }
    }

    fn char_width(&self, c: char) -> u16 {
        match winansi_byte(c) {
            Some(b @ 0x20..=0x7e) => self.table()[usize::from(b - 0x20)],
            Some(_) => FALLBACK_WIDTH,
            // Printed as '?'
            None => self.table()[usize::from(b'?' - 0x20)],
        }
    }
}

/// Width of `text` in points at `font_size`.
pub fn text_width(text: &str, style: FontStyle, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(style.char_width(c))).sum();
    #[allow(clippy::cast_precision_loss)]
    let units = units as f32;
    units * font_size / 1000.0
}

/// Word wrap `text` to fit within `max_width` points.
///
/// Words wider than `max_width` are broken at character boundaries. Always
/// returns at least one (possibly empty) line.
pub fn wrap(text: &str, max_width: f32, style: FontStyle, font_size: f32) -> Vec<String> {
    let space_width = text_width(" ", style, font_size);
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width: f32 = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word, style, font_size);

        // Break overlong words at character boundaries
        if word_width > max_width {
            if !current_line.is_empty() {
                lines.push(current_line);
            }
            let mut chunk = String::new();
            let mut chunk_width: f32 = 0.0;
            for c in word.chars() {
                let char_width = text_width(c.encode_utf8(&mut [0; 4]), style, font_size);
                if chunk_width + char_width > max_width && !chunk.is_empty() {
                    lines.push(chunk);
                    chunk = String::new();
                    chunk_width = 0.0;
                }
                chunk.push(c);
                chunk_width += char_width;
            }
            current_line = chunk;
            current_width = chunk_width;
            continue;
        }

        if current_line.is_empty() {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + space_width + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += space_width + word_width;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
