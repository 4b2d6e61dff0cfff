//! Term search over PDF pages with headings and remarks
//!
//! This crate provides:
//! - Positioned text extraction from PDFs
//! - Line reconstruction by vertical proximity
//! - Per-page headings from a three-band column heuristic
//! - Case-insensitive term search with "Remarks:" resolution

pub mod extractor;
pub mod fragments;
pub mod headings;
pub mod lines;
pub mod remarks;
pub mod report;
pub mod search;
pub mod terms;

pub use extractor::{extract_pages, extract_pages_mem};
pub use fragments::{Page, TextFragment};
pub use headings::{extract_heading, extract_headings, PageHeading};
pub use lines::{reconstruct_lines, ReconstructedLine};
pub use remarks::{resolve_remark, REMARK_PLACEHOLDER};
pub use report::{MatchRecord, Report};
pub use search::{search_pages, search_pages_with_options, SearchOptions};
pub use terms::{load_terms, parse_terms, SearchTerm};

use std::path::Path;

/// Search a PDF file for the given terms
pub fn search_pdf<P: AsRef<Path>>(path: P, terms: &[SearchTerm]) -> Result<Report, SearchError> {
    search_pdf_with_options(path, terms, &SearchOptions::default())
}

/// Search a PDF file for the given terms with custom options
pub fn search_pdf_with_options<P: AsRef<Path>>(
    path: P,
    terms: &[SearchTerm],
    options: &SearchOptions,
) -> Result<Report, SearchError> {
    let start = std::time::Instant::now();
    let pages = extract_pages(path)?;
    let report = search_pages_with_options(&pages, terms, options);
    log::debug!("search finished in {}ms", start.elapsed().as_millis());
    Ok(report)
}

/// Search a PDF held in memory for the given terms
pub fn search_pdf_mem(buffer: &[u8], terms: &[SearchTerm]) -> Result<Report, SearchError> {
    let pages = extract_pages_mem(buffer)?;
    Ok(search_pages(&pages, terms))
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parsing error: {0}")]
    Parse(String),
}

impl From<lopdf::Error> for SearchError {
    fn from(e: lopdf::Error) -> Self {
        SearchError::Parse(e.to_string())
    }
}
