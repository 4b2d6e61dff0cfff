//! Term search over reconstructed page lines
//!
//! Lines and headings are computed once per page. Each (term, page) pair is
//! then searched independently and the resulting groups are concatenated in
//! term order, then page order, then line order.

use rayon::prelude::*;

use crate::fragments::Page;
use crate::headings::{extract_heading, PageHeading, DEFAULT_HEADING_LINES, DEFAULT_MIN_HEADING_LEN};
use crate::lines::{reconstruct_lines_with_tolerance, ReconstructedLine, DEFAULT_LINE_TOLERANCE};
use crate::remarks::{resolve_remark, DEFAULT_REMARK_LOOKAHEAD, REMARK_PLACEHOLDER};
use crate::report::{MatchRecord, Report};
use crate::terms::SearchTerm;

/// Options for a search run
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Max Y difference between consecutive fragments of one line
    pub line_tolerance: f32,
    /// Heading lines kept per page
    pub heading_lines: usize,
    /// Minimum heading line length in characters
    pub min_heading_len: usize,
    /// Lines after a match searched for a remark
    pub remark_lookahead: usize,
    /// Remark used when none is found
    pub remark_placeholder: String,
    /// Heading used for pages without one
    pub no_heading_label: String,
    /// Search (term, page) pairs on the rayon pool
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            heading_lines: DEFAULT_HEADING_LINES,
            min_heading_len: DEFAULT_MIN_HEADING_LEN,
            remark_lookahead: DEFAULT_REMARK_LOOKAHEAD,
            remark_placeholder: REMARK_PLACEHOLDER.to_string(),
            no_heading_label: "No Heading".to_string(),
            parallel: true,
        }
    }
}

/// Per-page state shared by every term: lines, lowercase copies, heading
#[derive(Debug, Clone)]
struct PageLines {
    number: u32,
    lines: Vec<ReconstructedLine>,
    lowercase: Vec<String>,
    heading: PageHeading,
}

impl PageLines {
    fn build(page: &Page, options: &SearchOptions) -> Self {
        let lines = reconstruct_lines_with_tolerance(&page.fragments, options.line_tolerance);
        let lowercase = lines.iter().map(|l| l.text.to_lowercase()).collect();
        let heading = extract_heading(&page.fragments, options.heading_lines, options.min_heading_len);
        if heading.is_empty() {
            log::trace!("page {} has no heading candidates", page.number);
        }
        Self {
            number: page.number,
            lines,
            lowercase,
            heading,
        }
    }
}

/// Search all pages for all terms with default options
pub fn search_pages(pages: &[Page], terms: &[SearchTerm]) -> Report {
    search_pages_with_options(pages, terms, &SearchOptions::default())
}

/// Search all pages for all terms
pub fn search_pages_with_options(
    pages: &[Page],
    terms: &[SearchTerm],
    options: &SearchOptions,
) -> Report {
    if pages.is_empty() || terms.is_empty() {
        log::debug!(
            "nothing to search ({} pages, {} terms)",
            pages.len(),
            terms.len()
        );
        return Report::default();
    }

    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|p| p.number);

    let page_lines: Vec<PageLines> = if options.parallel {
        ordered
            .par_iter()
            .map(|p| PageLines::build(p, options))
            .collect()
    } else {
        ordered
            .iter()
            .map(|p| PageLines::build(p, options))
            .collect()
    };

    let units: Vec<(&SearchTerm, &PageLines)> = terms
        .iter()
        .flat_map(|term| page_lines.iter().map(move |page| (term, page)))
        .collect();

    // Order-preserving collect keeps groups in canonical order
    let groups: Vec<Vec<MatchRecord>> = if options.parallel {
        units
            .par_iter()
            .map(|&(term, page)| search_page(term, page, options))
            .collect()
    } else {
        units
            .iter()
            .map(|&(term, page)| search_page(term, page, options))
            .collect()
    };

    let records: Vec<MatchRecord> = groups.into_iter().flatten().collect();
    log::debug!(
        "searched {} pages for {} terms: {} matches",
        pages.len(),
        terms.len(),
        records.len()
    );
    Report::new(records)
}

/// Match one term against one page's lines
fn search_page(
    term: &SearchTerm,
    page: &PageLines,
    options: &SearchOptions,
) -> Vec<MatchRecord> {
    page.lowercase
        .iter()
        .enumerate()
        .filter(|(_, lowercase)| term.is_in(lowercase))
        .map(|(idx, _)| {
            let line = &page.lines[idx];
            MatchRecord {
                search_term: term.clone(),
                page: page.number,
                serial: line.serial(),
                matched_line: line.text.clone(),
                page_heading: heading_or_fallback(&page.heading, options),
                remark: resolve_remark(
                    &page.lines,
                    idx,
                    options.remark_lookahead,
                    &options.remark_placeholder,
                ),
            }
        })
        .collect()
}

fn heading_or_fallback(heading: &PageHeading, options: &SearchOptions) -> Vec<String> {
    if heading.is_empty() {
        vec![options.no_heading_label.clone()]
    } else {
        heading.clone()
    }
}
