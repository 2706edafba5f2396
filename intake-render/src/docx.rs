//! Editable Word rendering.

use crate::content::{Block, Document, Table};
use crate::error::{RenderError, RenderResult};
use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, Style, StyleType, Table as DocxTable, TableCell,
    TableRow,
};
use std::io::Cursor;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";

/// Packs the document as DOCX: a title, one Heading 1 per section, one
/// paragraph per field and a bordered table per repeating group.
pub fn write_docx(doc: &Document) -> RenderResult<Vec<u8>> {
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(40)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(28)
                .bold(),
        )
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&doc.title))
                .style(TITLE_STYLE)
                .align(AlignmentType::Center),
        );

    if let Some(at) = doc.generated_at {
        let stamp = format!("Generated {}", at.format("%m/%d/%Y %H:%M UTC"));
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(stamp).italic())
                .align(AlignmentType::Center),
        );
    }

    for section in &doc.sections {
        docx = docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(&section.heading))
                .style(HEADING_STYLE),
        );
        for block in &section.blocks {
            docx = match block {
                Block::Field { label, value } => docx.add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(format!("{label}: ")).bold())
                        .add_run(Run::new().add_text(value)),
                ),
                Block::Subheading(text) => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))
                }
                Block::Notice(text) => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).italic()))
                }
                Block::Table(table) => docx.add_table(grid_table(table)),
            };
        }
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| RenderError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

fn grid_table(table: &Table) -> DocxTable {
    let header = TableRow::new(
        table
            .columns
            .iter()
            .map(|c| cell(Run::new().add_text(c).bold()))
            .collect(),
    );
    let mut rows = vec![header];
    rows.extend(
        table
            .rows
            .iter()
            .map(|row| TableRow::new(row.iter().map(|v| cell(Run::new().add_text(v))).collect())),
    );
    DocxTable::new(rows)
}

fn cell(run: Run) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}
