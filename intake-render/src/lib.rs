//! Document rendering for the client intake core.
//!
//! A [`FormDataSet`] is first turned into a format-neutral [`Document`]
//! by [`build_document`]. Three emitters walk that tree:
//!
//! - [`render_editable`]: a DOCX the advisor can edit.
//! - [`render_report`]: a paginated PDF with "Page N of M" footers.
//! - [`render_review`]: the plain-text listing shown before submission.
//!
//! Section inclusion and value formatting live only in the builder, so the
//! three outputs always agree on what is shown.

mod content;
mod docx;
mod error;
mod format;
mod pdf;
mod review;

pub use content::{
    build_document, Block, Document, RenderOptions, Section, Table, DEFAULT_PLACEHOLDER,
    DEFAULT_TITLE, MONEY_KEYS,
};
pub use error::{RenderError, RenderResult};
pub use format::format_money;
pub use pdf::ReportFont;

use intake_types::FormDataSet;
use tracing::{debug, info};

/// Renders the editable DOCX document.
pub fn render_editable(data: &FormDataSet, opts: &RenderOptions) -> RenderResult<Vec<u8>> {
    let doc = build_document(data, opts)?;
    debug!(sections = doc.sections.len(), "rendering editable document");
    let bytes = docx::write_docx(&doc)?;
    info!(bytes = bytes.len(), "editable document rendered");
    Ok(bytes)
}

/// Renders the paginated PDF report.
pub fn render_report(data: &FormDataSet, opts: &RenderOptions) -> RenderResult<Vec<u8>> {
    let doc = build_document(data, opts)?;
    debug!(sections = doc.sections.len(), "rendering report");
    let bytes = pdf::write_pdf(&doc, opts.font.as_ref())?;
    info!(bytes = bytes.len(), "report rendered");
    Ok(bytes)
}

pub fn render_review(data: &FormDataSet, opts: &RenderOptions) -> RenderResult<String> {
    let doc = build_document(data, opts)?;
    Ok(review::write_review(&doc))
}
