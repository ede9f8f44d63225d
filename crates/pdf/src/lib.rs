//! # duolens-pdf: PDF Text Extraction
//!
//! Page-ordered text extraction for the duolens pipeline. Extraction is
//! linear and all-or-nothing: pages are walked in document order, each page's
//! recovered text is followed by a newline, and a parse failure on any page
//! aborts the whole run with the parser's error. There is no partial output
//! and no per-page error isolation.

use pdf::file::FileOptions;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum PdfExtractError {
    #[error("Failed to read PDF file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse PDF content: {0}")]
    Parse(String),
}

/// Extracts the text of every page, in page order, appending a newline after
/// each page.
pub fn extract_text(pdf_data: &[u8]) -> Result<String, PdfExtractError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| PdfExtractError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| PdfExtractError::Parse(e.to_string()))?;
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| PdfExtractError::Parse(e.to_string()))?;
            for op in operations.iter() {
                if let pdf::content::Op::TextDraw { text } = op {
                    full_text.push_str(&text.to_string_lossy());
                }
            }
        }
        full_text.push('\n');
    }

    debug!(
        pages = file.num_pages(),
        chars = full_text.len(),
        "Extracted PDF text"
    );
    Ok(full_text)
}

/// Reads a PDF from disk and extracts its text.
///
/// The document is re-read and re-parsed on every call; callers that ask
/// repeated questions about one document pay the extraction cost each time.
pub fn extract_text_from_path(path: &Path) -> Result<String, PdfExtractError> {
    let pdf_data = std::fs::read(path)?;
    extract_text(&pdf_data)
}
