//! Paginated PDF report.
//!
//! US Letter pages with one-inch margins, Helvetica text, gridded tables
//! and a "Page N of M" footer. Text WinAnsi cannot carry is drawn with an
//! embedded TrueType face when one is supplied. Content streams are left
//! uncompressed.

mod embedded;
mod font;
mod writer;

pub use embedded::ReportFont;

use crate::content::{Block, Document, Table};
use crate::error::RenderResult;
use chrono::{DateTime, Utc};
use embedded::UnicodeFace;
use font::{literal, win_ansi, Font};
use std::fmt::Write;
use tracing::warn;
use writer::ObjectWriter;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const FOOTER_BASELINE: f32 = 36.0;

const TITLE_SIZE: f32 = 18.0;
const STAMP_SIZE: f32 = 9.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 9.0;

const BODY_LEADING: f32 = 14.0;
const HEADING_LEADING: f32 = 24.0;
const ROW_HEIGHT: f32 = 16.0;
const TABLE_LEADING: f32 = 11.0;
const CELL_PADDING: f32 = 4.0;
const WRAP_INDENT: f32 = 18.0;

const UNICODE_RESOURCE: &str = "F3";

/// Lays out and serializes the report. Without `font`, characters outside
/// WinAnsi are drawn as `?`.
pub fn write_pdf(doc: &Document, font: Option<&ReportFont>) -> RenderResult<Vec<u8>> {
    let text = Typesetter::new(font.map(UnicodeFace::new).transpose()?);
    let mut layout = Layout::new(text);
    layout.title(&doc.title, doc.generated_at);
    for section in &doc.sections {
        layout.heading(&section.heading);
        for block in &section.blocks {
            match block {
                Block::Field { label, value } => layout.field(label, value),
                Block::Subheading(text) => layout.line(Font::Bold, text, MARGIN),
                Block::Notice(text) => layout.line(Font::Regular, text, MARGIN),
                Block::Table(table) => layout.table(table),
            }
        }
    }
    let (pages, text) = layout.finish();
    tracing::debug!(pages = pages.len(), "report laid out");
    serialize(doc, pages, text)
}

fn serialize(
    doc: &Document,
    mut pages: Vec<String>,
    mut text: Typesetter<'_>,
) -> RenderResult<Vec<u8>> {
    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let footer = format!("Page {} of {total}", i + 1);
        let x = (PAGE_WIDTH - text.width(Font::Regular, &footer, FOOTER_SIZE)) / 2.0;
        text.show(page, Font::Regular, FOOTER_SIZE, x, FOOTER_BASELINE, &footer);
    }
    if text.replaced > 0 {
        warn!(
            replaced = text.replaced,
            "characters without a usable glyph were drawn as '?'"
        );
    }

    let mut w = ObjectWriter::new();
    let catalog = w.reserve();
    let page_tree = w.reserve();
    let regular = w.add(font_dict(Font::Regular));
    let bold = w.add(font_dict(Font::Bold));
    let mut fonts = format!("/F1 {regular} 0 R /F2 {bold} 0 R");
    if let Some(face) = text.unicode.as_ref().filter(|f| f.is_used()) {
        let id = face.write_objects(&mut w)?;
        let _ = write!(fonts, " /{UNICODE_RESOURCE} {id} 0 R");
    }

    let mut kids = Vec::with_capacity(total);
    for content in &pages {
        let stream = w.add_stream(content);
        let page = w.add(format!(
            "<< /Type /Page /Parent {page_tree} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
             /Resources << /Font << {fonts} >> >> \
             /Contents {stream} 0 R >>"
        ));
        kids.push(format!("{page} 0 R"));
    }

    w.set(
        page_tree,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {total} >>",
            kids.join(" ")
        ),
    );
    w.set(catalog, format!("<< /Type /Catalog /Pages {page_tree} 0 R >>"));
    let info = w.add(info_dict(&doc.title, doc.generated_at));
    Ok(w.finish(catalog, info))
}

fn font_dict(font: Font) -> String {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        font.base_name()
    )
}

fn info_dict(title: &str, generated_at: Option<DateTime<Utc>>) -> String {
    let mut dict = format!("<< /Title {} /Producer (intake-render)", text_string(title));
    if let Some(at) = generated_at {
        let _ = write!(dict, " /CreationDate (D:{}Z)", at.format("%Y%m%d%H%M%S"));
    }
    dict.push_str(" >>");
    dict
}

/// Metadata string: a literal for ASCII, UTF-16BE hex otherwise.
fn text_string(text: &str) -> String {
    if text.is_ascii() {
        return format!("({})", literal(text));
    }
    let mut out = String::from("<FEFF");
    for unit in text.encode_utf16() {
        let _ = write!(out, "{unit:04X}");
    }
    out.push('>');
    out
}

/// A stretch of text drawn with one font resource.
#[derive(Debug, PartialEq)]
enum Run {
    Latin(String),
    Unicode(String),
}

/// Measures and draws text, sending characters outside WinAnsi to the
/// embedded face.
struct Typesetter<'a> {
    unicode: Option<UnicodeFace<'a>>,
    /// Characters drawn as `?` for want of a glyph.
    replaced: usize,
}

impl<'a> Typesetter<'a> {
    fn new(unicode: Option<UnicodeFace<'a>>) -> Self {
        Self {
            unicode,
            replaced: 0,
        }
    }

    fn runs(&self, text: &str) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for c in text.chars() {
            let unicode = win_ansi(c).is_none()
                && self
                    .unicode
                    .as_ref()
                    .is_some_and(|face| face.glyph(c).is_some());
            let extends = matches!(
                (runs.last(), unicode),
                (Some(Run::Latin(_)), false) | (Some(Run::Unicode(_)), true)
            );
            match runs.last_mut() {
                Some(Run::Latin(s) | Run::Unicode(s)) if extends => s.push(c),
                _ if unicode => runs.push(Run::Unicode(c.to_string())),
                _ => runs.push(Run::Latin(c.to_string())),
            }
        }
        runs
    }

    fn width(&self, font: Font, text: &str, size: f32) -> f32 {
        self.runs(text)
            .iter()
            .map(|run| match (run, &self.unicode) {
                (Run::Unicode(s), Some(face)) => face.width(s, size),
                (Run::Latin(s), _) | (Run::Unicode(s), None) => font.width(s, size),
            })
            .sum()
    }

    fn show(&mut self, out: &mut String, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let runs = self.runs(text);
        let single = match runs.as_slice() {
            [] => Some(""),
            [Run::Latin(s)] => Some(s.as_str()),
            _ => None,
        };
        if let Some(s) = single {
            self.replaced += s.chars().filter(|c| win_ansi(*c).is_none()).count();
            let _ = writeln!(
                out,
                "BT /{} {size} Tf {x:.2} {y:.2} Td ({}) Tj ET",
                font.resource(),
                literal(s)
            );
            return;
        }

        let _ = write!(out, "BT {x:.2} {y:.2} Td");
        for run in &runs {
            match (run, self.unicode.as_mut()) {
                (Run::Unicode(s), Some(face)) => {
                    let _ = write!(out, " /{UNICODE_RESOURCE} {size} Tf <{}> Tj", face.encode(s));
                }
                (Run::Latin(s), _) | (Run::Unicode(s), None) => {
                    self.replaced += s.chars().filter(|c| win_ansi(*c).is_none()).count();
                    let _ = write!(out, " /{} {size} Tf ({}) Tj", font.resource(), literal(s));
                }
            }
        }
        out.push_str(" ET\n");
    }

    /// Splits `text` into lines no wider than `max_width`. Words longer than
    /// a line are broken between characters.
    fn wrap(&self, text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if self.width(font, &candidate, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for c in word.chars() {
                current.push(c);
                if self.width(font, &current, size) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Height of a row of wrapped cells.
fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
    ROW_HEIGHT + lines.saturating_sub(1) as f32 * TABLE_LEADING
}

/// Top-down page filler.
struct Layout<'a> {
    pages: Vec<String>,
    current: String,
    y: f32,
    text: Typesetter<'a>,
}

impl<'a> Layout<'a> {
    fn new(text: Typesetter<'a>) -> Self {
        Self {
            pages: Vec::new(),
            current: String::new(),
            y: PAGE_HEIGHT - MARGIN,
            text,
        }
    }

    fn at_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    fn ensure(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.at_top() {
            self.new_page();
        }
    }

    fn put(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        self.text.show(&mut self.current, font, size, x, y, text);
    }

    fn title(&mut self, title: &str, generated_at: Option<DateTime<Utc>>) {
        let x = (PAGE_WIDTH - self.text.width(Font::Bold, title, TITLE_SIZE)) / 2.0;
        self.y -= TITLE_SIZE;
        self.put(Font::Bold, TITLE_SIZE, x, self.y, title);
        self.y -= 10.0;

        if let Some(at) = generated_at {
            let stamp = format!("Generated {}", at.format("%m/%d/%Y %H:%M UTC"));
            let x = (PAGE_WIDTH - self.text.width(Font::Regular, &stamp, STAMP_SIZE)) / 2.0;
            self.y -= STAMP_SIZE;
            self.put(Font::Regular, STAMP_SIZE, x, self.y, &stamp);
            self.y -= 6.0;
        }
    }

    fn heading(&mut self, text: &str) {
        // Keep the heading together with at least one line of its section.
        self.ensure(HEADING_LEADING + BODY_LEADING);
        let baseline = self.y - HEADING_LEADING + 8.0;
        self.put(Font::Bold, HEADING_SIZE, MARGIN, baseline, text);
        let rule = baseline - 4.0;
        let _ = writeln!(
            self.current,
            "0.5 w {MARGIN:.2} {rule:.2} m {:.2} {rule:.2} l S",
            MARGIN + CONTENT_WIDTH
        );
        self.y -= HEADING_LEADING;
    }

    fn line(&mut self, font: Font, text: &str, x: f32) {
        for line in self.text.wrap(text, font, BODY_SIZE, MARGIN + CONTENT_WIDTH - x) {
            self.ensure(BODY_LEADING);
            self.y -= BODY_LEADING;
            self.put(font, BODY_SIZE, x, self.y + 4.0, &line);
        }
    }

    fn field(&mut self, label: &str, value: &str) {
        let label = format!("{label}: ");
        let label_width = self.text.width(Font::Bold, &label, BODY_SIZE);

        // Long labels push the value onto its own indented lines.
        let (value_x, inline) = if label_width <= CONTENT_WIDTH / 2.0 {
            (MARGIN + label_width, true)
        } else {
            (MARGIN + WRAP_INDENT, false)
        };
        let lines = self
            .text
            .wrap(value, Font::Regular, BODY_SIZE, MARGIN + CONTENT_WIDTH - value_x);

        self.ensure(BODY_LEADING);
        self.y -= BODY_LEADING;
        let baseline = self.y + 4.0;
        self.put(Font::Bold, BODY_SIZE, MARGIN, baseline, &label);

        let mut rest = lines.iter();
        if inline {
            if let Some(first) = rest.next() {
                self.put(Font::Regular, BODY_SIZE, value_x, baseline, first);
            }
        }
        for line in rest {
            self.ensure(BODY_LEADING);
            self.y -= BODY_LEADING;
            self.put(Font::Regular, BODY_SIZE, value_x, self.y + 4.0, line);
        }
    }

    fn table(&mut self, table: &Table) {
        let columns = table.columns.len().max(1);
        let col_width = CONTENT_WIDTH / columns as f32;
        let header = self.cell_lines(&table.columns, Font::Bold, col_width);

        let first = table.rows.first().map_or(ROW_HEIGHT, |row| {
            row_height(&self.cell_lines(row, Font::Regular, col_width))
        });
        self.ensure(row_height(&header) + first);
        self.table_row(&header, col_width, true);
        for row in &table.rows {
            let cells = self.cell_lines(row, Font::Regular, col_width);
            if self.y - row_height(&cells) < MARGIN {
                self.new_page();
                self.table_row(&header, col_width, true);
            }
            self.table_row(&cells, col_width, false);
        }
        self.y -= 6.0;
    }

    /// Each cell's text wrapped to the column.
    fn cell_lines(&self, cells: &[String], font: Font, col_width: f32) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|cell| {
                self.text
                    .wrap(cell, font, TABLE_SIZE, col_width - 2.0 * CELL_PADDING)
            })
            .collect()
    }

    /// Draws one row tall enough for its longest cell. A cell's lines are
    /// emitted together so extracted text keeps each cell contiguous.
    fn table_row(&mut self, cells: &[Vec<String>], col_width: f32, header: bool) {
        let height = row_height(cells);
        let top = self.y;
        let bottom = top - height;
        if header {
            let _ = writeln!(
                self.current,
                "0.9 g {MARGIN:.2} {bottom:.2} {CONTENT_WIDTH:.2} {height:.2} re f 0 g"
            );
        }
        let font = if header { Font::Bold } else { Font::Regular };
        for (i, lines) in cells.iter().enumerate() {
            let x = MARGIN + i as f32 * col_width;
            let _ = writeln!(
                self.current,
                "0.5 w {x:.2} {bottom:.2} {col_width:.2} {height:.2} re S"
            );
            for (n, line) in lines.iter().enumerate() {
                let baseline = top - (ROW_HEIGHT - 5.0) - n as f32 * TABLE_LEADING;
                self.put(font, TABLE_SIZE, x + CELL_PADDING, baseline, line);
            }
        }
        self.y = bottom;
    }

    fn finish(mut self) -> (Vec<String>, Typesetter<'a>) {
        self.pages.push(self.current);
        (self.pages, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin() -> Typesetter<'static> {
        Typesetter::new(None)
    }

    #[test]
    fn wrap_respects_width() {
        let text = "one two three four five six seven eight nine ten";
        let lines = latin().wrap(text, Font::Regular, 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(Font::Regular.width(line, 10.0) <= 60.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_breaks_long_words() {
        let lines = latin().wrap(&"W".repeat(40), Font::Regular, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "W".repeat(40));
    }

    #[test]
    fn wrap_keeps_empty_text_as_one_line() {
        assert_eq!(
            latin().wrap("", Font::Regular, 10.0, 100.0),
            vec![String::new()]
        );
    }

    #[test]
    fn without_a_face_everything_is_one_latin_run() {
        let mut text = latin();
        assert_eq!(text.runs("José 王"), vec![Run::Latin("José 王".to_string())]);

        let mut out = String::new();
        text.show(&mut out, Font::Regular, 10.0, 0.0, 0.0, "José 王");
        assert_eq!(out, "BT /F1 10 Tf 0.00 0.00 Td (Jos\\351 ?) Tj ET\n");
        assert_eq!(text.replaced, 1);
    }

    #[test]
    fn rows_grow_with_their_tallest_cell() {
        assert_eq!(row_height(&[vec!["a".to_string()]]), ROW_HEIGHT);
        let cells = vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
        ];
        assert_eq!(row_height(&cells), ROW_HEIGHT + 2.0 * TABLE_LEADING);
    }

    #[test]
    fn long_cells_wrap_instead_of_truncating() {
        let table = Table {
            columns: vec!["Name".to_string(); 4],
            rows: vec![vec![
                "Margaret Eleanor Worthington Revocable Trust".to_string(),
                "Trust".to_string(),
                "100%".to_string(),
                "x".to_string(),
            ]],
            row_label: None,
        };
        let mut layout = Layout::new(latin());
        layout.table(&table);
        let (pages, _) = layout.finish();
        let page = &pages[0];

        assert!(!page.contains("..."));
        let shown: Vec<&str> = page
            .lines()
            .filter_map(|l| l.split_once(" Td (")?.1.strip_suffix(") Tj ET"))
            .collect();
        let name_lines = &shown[4..shown.len() - 3];
        assert!(name_lines.len() > 1, "{shown:?}");
        assert_eq!(
            name_lines.join(" "),
            "Margaret Eleanor Worthington Revocable Trust"
        );
    }
}
