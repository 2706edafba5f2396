//! Plain-text review listing shown before submission.

use crate::content::{Block, Document};
use std::fmt::Write;

/// Renders the document as indented plain text.
///
/// Section headings are upper-cased; fields are indented two spaces. Table
/// rows are listed one record at a time.
pub fn write_review(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} - REVIEW ===", doc.title.to_uppercase());
    out.push('\n');

    for section in &doc.sections {
        let _ = writeln!(out, "{}:", section.heading.to_uppercase());
        for block in &section.blocks {
            match block {
                Block::Field { label, value } => {
                    let _ = writeln!(out, "  {label}: {value}");
                }
                Block::Subheading(text) => {
                    let _ = writeln!(out, "  {text}:");
                }
                Block::Notice(text) => {
                    let _ = writeln!(out, "  {text}");
                }
                Block::Table(table) => {
                    for (i, row) in table.rows.iter().enumerate() {
                        let (heading, cells) = match &table.row_label {
                            Some(noun) => (format!("{noun} {}", i + 1), &row[..]),
                            None => (
                                row.first().cloned().unwrap_or_default(),
                                row.get(1..).unwrap_or(&[]),
                            ),
                        };
                        let skip = table.columns.len().saturating_sub(cells.len());
                        let columns = table.columns.get(skip..).unwrap_or(&[]);
                        let _ = writeln!(out, "  {heading}:");
                        for (column, cell) in columns.iter().zip(cells) {
                            let _ = writeln!(out, "    {column}: {cell}");
                        }
                    }
                }
            }
        }
        out.push('\n');
    }
    out
}
