//! Page heading extraction
//!
//! Headings are the first few meaningful lines at the top of a page. Each
//! distinct (floored) Y position is one candidate line; its horizontal span is
//! cut into three equal bands and the middle band, usually a page number, is
//! dropped. This is a fixed heuristic and does not try to find real column
//! boundaries.

use std::collections::{BTreeMap, HashMap};

use crate::fragments::{Page, TextFragment};

/// Default number of heading lines kept per page
pub const DEFAULT_HEADING_LINES: usize = 3;

/// Candidate lines shorter than this (in characters) are discarded
pub const DEFAULT_MIN_HEADING_LEN: usize = 4;

/// Ordered heading lines of one page, possibly empty
pub type PageHeading = Vec<String>;

/// Horizontal band of a fragment within its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Left,
    Middle,
    Right,
}

fn band_of(x: f32, min_x: f32, col_width: f32) -> Band {
    if col_width <= 0.0 {
        return Band::Left;
    }
    let relative_x = x - min_x;
    if relative_x < col_width {
        Band::Left
    } else if relative_x < col_width * 2.0 {
        Band::Middle
    } else {
        Band::Right
    }
}

/// Join the left and right bands of one Y bucket into a candidate line
fn candidate_line(parts: &mut [(f32, &str)]) -> String {
    parts.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let min_x = parts.iter().map(|p| p.0).fold(f32::INFINITY, f32::min);
    let max_x = parts.iter().map(|p| p.0).fold(f32::NEG_INFINITY, f32::max);
    let col_width = (max_x - min_x) / 3.0;

    let mut left = Vec::new();
    let mut right = Vec::new();
    for &(x, text) in parts.iter() {
        match band_of(x, min_x, col_width) {
            Band::Left => left.push(text),
            Band::Middle => {}
            Band::Right => right.push(text),
        }
    }

    left.extend(right);
    left.join(" ").trim().to_string()
}

/// Derive the heading of a single page
pub fn extract_heading(fragments: &[TextFragment], max_lines: usize, min_len: usize) -> PageHeading {
    // Bucket by exact floored Y, no tolerance
    let mut buckets: BTreeMap<i64, Vec<(f32, &str)>> = BTreeMap::new();
    for fragment in fragments {
        if !fragment.has_position() {
            continue;
        }
        let text = fragment.text.trim();
        if text.is_empty() {
            continue;
        }
        buckets
            .entry(fragment.y.floor() as i64)
            .or_default()
            .push((fragment.x, text));
    }

    // Highest Y is the top of the page
    buckets
        .into_values()
        .rev()
        .map(|mut parts| candidate_line(&mut parts))
        .filter(|line| line.chars().count() >= min_len)
        .take(max_lines)
        .collect()
}

/// Derive headings for every page, keyed by page number
///
/// Pages without a surviving candidate map to an empty heading.
/// Pages sharing a number keep only the last one's heading.
pub fn extract_headings(
    pages: &[Page],
    max_lines: usize,
    min_len: usize,
) -> HashMap<u32, PageHeading> {
    pages
        .iter()
        .map(|page| {
            let heading = extract_heading(&page.fragments, max_lines, min_len);
            if heading.is_empty() {
                log::trace!("page {} has no heading candidates", page.number);
            }
            (page.number, heading)
        })
        .collect()
}
