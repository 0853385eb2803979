//! Single-page PDF rendering of journal entries.
//!
//! The writer emits a minimal PDF 1.4 file using the standard Helvetica
//! fonts, so no font data is embedded. Layout coordinates are given from the
//! top of the page and flipped when drawn. Text is limited to Latin-1;
//! anything else is drawn as `?`.

use super::text::format_export_date;
use crate::constants::{
    APP_DISPLAY_NAME, BODY_FONT_SIZE, BODY_LINE_SPACING, BODY_Y, CAPTION_FONT_SIZE, DATE_Y,
    PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH, SECONDARY_TEXT_GRAY, TAGS_FOOTER_Y, TITLE_FONT_SIZE,
    TITLE_Y,
};
use crate::models::JournalEntry;
use chrono::{Local, TimeZone};
use std::fmt::Display;

const DOCUMENT_AUTHOR: &str = "User";
const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];
const DEFAULT_GLYPH_WIDTH: u16 = 556;

fn glyph_width(ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        DEFAULT_GLYPH_WIDTH
    }
}

/// Width of `text` in points at `font_size`.
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|ch| f32::from(glyph_width(ch))).sum::<f32>() * font_size / 1000.0
}

/// Escapes a string for a PDF literal string, mapping it to Latin-1.
///
/// Bytes above 0x7E are written as octal escapes so the output stays ASCII.
fn pdf_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            '\t' => out.push(' '),
            _ => out.push('?'),
        }
    }
    out.push(')');
    out
}

/// Greedy word wrap to `max_width` points. Words wider than a line are
/// broken between characters; blank source lines are kept.
fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font_size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            for ch in word.chars() {
                current.push(ch);
                if text_width(&current, font_size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Accumulates drawing operators for the page content stream.
struct PageContent {
    ops: String,
}

impl PageContent {
    fn new() -> Self {
        PageContent { ops: String::new() }
    }

    /// Draws one line of text whose top edge sits `top` points below the
    /// top of the page.
    fn text(&mut self, font: &str, size: f32, gray: f32, x: f32, top: f32, text: &str) {
        let baseline = PAGE_HEIGHT - top - size;
        self.ops.push_str(&format!(
            "BT /{} {} Tf {} g {} {} Td {} Tj ET\n",
            font,
            fmt_num(size),
            fmt_num(gray),
            fmt_num(x),
            fmt_num(baseline),
            pdf_string(text)
        ));
    }

    fn into_bytes(self) -> Vec<u8> {
        self.ops.into_bytes()
    }
}

fn fmt_num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

/// Serializes numbered objects with a cross-reference table.
struct PdfWriter {
    buffer: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        PdfWriter {
            buffer,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, body: &str) {
        self.offsets.push(self.buffer.len());
        let number = self.offsets.len();
        self.buffer
            .extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", number, body).as_bytes());
    }

    fn stream(&mut self, data: &[u8]) {
        self.offsets.push(self.buffer.len());
        let number = self.offsets.len();
        self.buffer.extend_from_slice(
            format!("{} 0 obj\n<< /Length {} >>\nstream\n", number, data.len()).as_bytes(),
        );
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_offset = self.buffer.len();
        let size = self.offsets.len() + 1;

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &self.offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, root, info, xref_offset
        ));

        self.buffer.extend_from_slice(xref.as_bytes());
        self.buffer
    }
}

fn page_content<Tz>(entry: &JournalEntry, tz: &Tz) -> PageContent
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut page = PageContent::new();
    let content_width = PAGE_WIDTH - 2.0 * PAGE_MARGIN;
    let content_bottom = PAGE_HEIGHT - PAGE_MARGIN;

    page.text(
        FONT_BOLD,
        TITLE_FONT_SIZE,
        0.0,
        PAGE_MARGIN,
        TITLE_Y,
        &entry.title,
    );
    page.text(
        FONT_REGULAR,
        CAPTION_FONT_SIZE,
        SECONDARY_TEXT_GRAY,
        PAGE_MARGIN,
        DATE_Y,
        &format_export_date(entry, tz),
    );

    let line_height = BODY_FONT_SIZE * BODY_LINE_SPACING;
    let mut top = BODY_Y;
    for line in wrap_text(&entry.content, BODY_FONT_SIZE, content_width) {
        if top + line_height > content_bottom {
            break;
        }
        if !line.is_empty() {
            page.text(FONT_REGULAR, BODY_FONT_SIZE, 0.0, PAGE_MARGIN, top, &line);
        }
        top += line_height;
    }

    if !entry.tags.is_empty() {
        page.text(
            FONT_REGULAR,
            CAPTION_FONT_SIZE,
            SECONDARY_TEXT_GRAY,
            PAGE_MARGIN,
            TAGS_FOOTER_Y,
            &format!("Tags: {}", entry.tags.join(", ")),
        );
    }

    page
}

/// Renders an entry as a one-page PDF using the local time zone.
pub fn to_document(entry: &JournalEntry) -> Vec<u8> {
    to_document_in(entry, &Local)
}

/// Renders an entry as a one-page PDF with its date shown in `tz`.
pub fn to_document_in<Tz>(entry: &JournalEntry, tz: &Tz) -> Vec<u8>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let content = page_content(entry, tz).into_bytes();
    let mut writer = PdfWriter::new();

    writer.object("<< /Type /Catalog /Pages 2 0 R >>");
    writer.object("<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    writer.object(&format!(
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
         /Resources << /Font << /{} 5 0 R /{} 6 0 R >> >> /Contents 4 0 R >>",
        fmt_num(PAGE_WIDTH),
        fmt_num(PAGE_HEIGHT),
        FONT_REGULAR,
        FONT_BOLD
    ));
    writer.stream(&content);
    writer.object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    writer.object(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );
    writer.object(&format!(
        "<< /Creator {} /Author {} /Title {} >>",
        pdf_string(APP_DISPLAY_NAME),
        pdf_string(DOCUMENT_AUTHOR),
        pdf_string(&entry.title)
    ));

    writer.finish(1, 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_document_structure() {
        let entry = JournalEntry::new("Evening (Psalm 4)", "In peace I will lie down and sleep.");
        let bytes = to_document_in(&entry, &Utc);
        let text = as_text(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(text.contains("/MediaBox [0 0 612 792]"));
        assert!(text.contains("/Title (Evening \\(Psalm 4\\))"));
        assert!(text.contains("/Creator (Faith Journal)"));
        assert!(text.contains("/Author (User)"));
        assert!(text.contains("/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = to_document_in(&JournalEntry::new("Title", "Body"), &Utc);

        let xref_start = bytes
            .windows(5)
            .position(|window| window == b"xref\n")
            .unwrap();
        let table = std::str::from_utf8(&bytes[xref_start..]).unwrap();
        let offsets: Vec<usize> = table
            .lines()
            .skip(3)
            .take(7)
            .map(|line| line[..10].parse().unwrap())
            .collect();

        for (idx, offset) in offsets.iter().enumerate() {
            let expected = format!("{} 0 obj", idx + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()), "object {}", idx + 1);
        }
    }

    #[test]
    fn test_tags_footer_only_with_tags() {
        let plain = as_text(&to_document_in(&JournalEntry::new("t", "c"), &Utc));
        assert!(!plain.contains("(Tags:"));

        let tagged = JournalEntry::new("t", "c").with_tags(vec!["hope".to_string()]);
        let tagged = as_text(&to_document_in(&tagged, &Utc));
        assert!(tagged.contains("(Tags: hope)"));
    }

    #[test]
    fn test_non_latin1_text_is_replaced() {
        assert_eq!(pdf_string("Día ✝"), "(D\\355a ?)");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "word ".repeat(200);
        let lines = wrap_text(&text, BODY_FONT_SIZE, 512.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, BODY_FONT_SIZE) <= 512.0);
        }
    }

    #[test]
    fn test_wrap_breaks_long_words_and_keeps_blank_lines() {
        let long_word = "x".repeat(200);
        let lines = wrap_text(&format!("first\n\n{}", long_word), BODY_FONT_SIZE, 100.0);
        assert_eq!(lines[0], "first");
        assert_eq!(lines[1], "");
        assert!(lines.len() > 3);
        assert_eq!(lines[2..].concat(), long_word);
    }

    #[test]
    fn test_overflowing_body_is_clipped() {
        let content = (0..200)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let text = as_text(&to_document_in(&JournalEntry::new("Long", content), &Utc));

        assert!(text.contains("(line 0)"));
        assert!(!text.contains("(line 199)"));
    }
}
