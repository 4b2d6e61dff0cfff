//! Remark resolution for matched lines
//!
//! A remark is the text after a "Remarks:" label (colon, hyphen or en-dash
//! separator). It is taken from the matched line itself, or failing that from
//! the first of the next few lines that carries the label.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::lines::ReconstructedLine;

/// Number of lines after a match searched for a remark
pub const DEFAULT_REMARK_LOOKAHEAD: usize = 2;

/// Remark used when none can be found
pub const REMARK_PLACEHOLDER: &str = "—";

static INLINE_REMARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)remarks\s*[:\-–]\s*(.*)").unwrap());

static REMARK_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)remarks\s*[:\-–]").unwrap());

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:\-–]").unwrap());

/// Remark written on the line itself
///
/// `Some("")` means the label is present with nothing after it.
pub fn try_extract_from_line(line: &str) -> Option<String> {
    INLINE_REMARK_RE
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim().to_string())
}

/// Remark on one of the `window` lines following `index`
///
/// The first labelled line wins; its remark is the segment between the first
/// and second separator on that line.
pub fn try_extract_from_lookahead(
    lines: &[ReconstructedLine],
    index: usize,
    window: usize,
) -> Option<String> {
    lines
        .iter()
        .skip(index + 1)
        .take(window)
        .find(|line| REMARK_LABEL_RE.is_match(&line.text))
        .map(|line| {
            SEPARATOR_RE
                .split(&line.text)
                .nth(1)
                .unwrap_or("")
                .trim()
                .to_string()
        })
}

/// Resolve the remark for the line at `index`, never returning an empty string
pub fn resolve_remark(
    lines: &[ReconstructedLine],
    index: usize,
    window: usize,
    placeholder: &str,
) -> String {
    let Some(line) = lines.get(index) else {
        return placeholder.to_string();
    };

    // A label on the matched line settles it, even when empty
    let remark = match try_extract_from_line(&line.text) {
        Some(remark) => remark,
        None => try_extract_from_lookahead(lines, index, window).unwrap_or_default(),
    };

    if remark.is_empty() {
        placeholder.to_string()
    } else {
        remark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<ReconstructedLine> {
        texts
            .iter()
            .enumerate()
            .map(|(order, t)| ReconstructedLine {
                text: t.to_string(),
                order,
            })
            .collect()
    }

    fn resolve(texts: &[&str], index: usize) -> String {
        resolve_remark(&lines(texts), index, DEFAULT_REMARK_LOOKAHEAD, REMARK_PLACEHOLDER)
    }

    #[test]
    fn test_from_line_separators() {
        assert_eq!(try_extract_from_line("Remarks: check valve"), Some("check valve".into()));
        assert_eq!(try_extract_from_line("REMARKS - ok"), Some("ok".into()));
        assert_eq!(try_extract_from_line("pump remarks–  worn seal "), Some("worn seal".into()));
        assert_eq!(try_extract_from_line("Remarks   :x"), Some("x".into()));
        assert_eq!(try_extract_from_line("Remarks pending"), None);
    }

    #[test]
    fn test_from_line_empty_remainder() {
        assert_eq!(try_extract_from_line("Remarks:   "), Some(String::new()));
        assert_eq!(resolve(&["Valve Remarks:", "Remarks: ignored"], 0), REMARK_PLACEHOLDER);
    }

    #[test]
    fn test_lookahead_next_line() {
        assert_eq!(resolve(&["Valve status", "Remarks - replaced"], 0), "replaced");
    }

    #[test]
    fn test_lookahead_en_dash() {
        assert_eq!(resolve(&["Valve", "Remarks – fixed"], 0), "fixed");
    }

    #[test]
    fn test_lookahead_second_line() {
        assert_eq!(resolve(&["Valve", "pressure 40", "remarks: tighten"], 0), "tighten");
    }

    #[test]
    fn test_lookahead_stops_at_window() {
        assert_eq!(resolve(&["Valve", "a", "b", "Remarks: too far"], 0), REMARK_PLACEHOLDER);
    }

    #[test]
    fn test_lookahead_takes_segment_after_first_separator() {
        assert_eq!(resolve(&["Valve", "Remarks: due 2024-05"], 0), "due 2024");
        assert_eq!(resolve(&["Valve", "Note: Remarks - x"], 0), "Remarks");
    }

    #[test]
    fn test_lookahead_first_labelled_line_wins() {
        assert_eq!(resolve(&["Valve", "Remarks:", "Remarks: later"], 0), REMARK_PLACEHOLDER);
    }

    #[test]
    fn test_lookahead_past_end_of_page() {
        assert_eq!(resolve(&["a", "Valve"], 1), REMARK_PLACEHOLDER);
        assert_eq!(try_extract_from_lookahead(&lines(&["Valve"]), 0, 2), None);
    }

    #[test]
    fn test_no_remark_is_placeholder() {
        let remark = resolve(&["Valve", "nothing", "here"], 0);
        assert_eq!(remark, REMARK_PLACEHOLDER);
        assert!(!remark.is_empty());
    }

    #[test]
    fn test_custom_placeholder() {
        assert_eq!(resolve_remark(&lines(&["Valve"]), 0, 2, "n/a"), "n/a");
    }
}
