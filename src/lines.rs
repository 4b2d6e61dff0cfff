//! Line reconstruction from positioned fragments
//!
//! Fragments are consumed in stream order. A fragment joins the current line
//! while its Y coordinate stays within a tolerance of the previous fragment's
//! Y; otherwise the current line is closed and a new one starts.

use crate::fragments::TextFragment;

/// Default vertical tolerance, in PDF units
pub const DEFAULT_LINE_TOLERANCE: f32 = 5.0;

/// A logical line of text on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedLine {
    pub text: String,
    /// Position within the page's line sequence (0-indexed)
    pub order: usize,
}

impl ReconstructedLine {
    /// 1-based position of this line on its page
    pub fn serial(&self) -> usize {
        self.order + 1
    }
}

/// Group a page's fragments into lines using the default tolerance
pub fn reconstruct_lines(fragments: &[TextFragment]) -> Vec<ReconstructedLine> {
    reconstruct_lines_with_tolerance(fragments, DEFAULT_LINE_TOLERANCE)
}

/// Group a page's fragments into lines
///
/// Unlike block-level grouping this never re-sorts: stream order is kept both
/// across and within lines. The comparison uses the raw Y of the previous
/// fragment, so a slowly drifting baseline keeps merging.
pub fn reconstruct_lines_with_tolerance(
    fragments: &[TextFragment],
    tolerance: f32,
) -> Vec<ReconstructedLine> {
    let mut texts: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut last_y: Option<f32> = None;

    for fragment in fragments {
        if !fragment.has_position() {
            log::trace!("skipping fragment without position: {:?}", fragment.text);
            continue;
        }

        let same_line = last_y.map_or(true, |y| (fragment.y - y).abs() < tolerance);
        if !same_line {
            // Mid-stream flushes keep empty lines so serials stay stable
            texts.push(current.trim().to_string());
            current.clear();
        }
        current.push_str(&fragment.text);
        current.push(' ');
        last_y = Some(fragment.y);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        texts.push(tail.to_string());
    }

    texts
        .into_iter()
        .enumerate()
        .map(|(order, text)| ReconstructedLine { text, order })
        .collect()
}
