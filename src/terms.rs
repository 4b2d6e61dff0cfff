//! Search term list parsing

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::SearchError;

/// A non-empty, trimmed search term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SearchTerm {
    text: String,
    lowercase: String,
}

impl SearchTerm {
    /// Returns `None` when the input is blank
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            lowercase: text.to_lowercase(),
        })
    }

    /// The term as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub(crate) fn lowercase(&self) -> &str {
        &self.lowercase
    }

    /// Case-insensitive substring test against an already-lowercased line
    pub(crate) fn is_in(&self, lowercase_line: &str) -> bool {
        lowercase_line.contains(self.lowercase())
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<SearchTerm> for String {
    fn from(term: SearchTerm) -> Self {
        term.text
    }
}

/// Split a raw term list into terms, one per non-blank line
pub fn parse_terms(raw: &str) -> Vec<SearchTerm> {
    raw.split('\n').filter_map(SearchTerm::new).collect()
}

/// Read and parse a term list file
pub fn load_terms<P: AsRef<Path>>(path: P) -> Result<Vec<SearchTerm>, SearchError> {
    let raw = std::fs::read_to_string(path)?;
    let terms = parse_terms(&raw);
    log::debug!("loaded {} search terms", terms.len());
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_terms_rejected() {
        assert!(SearchTerm::new("").is_none());
        assert!(SearchTerm::new("  \t ").is_none());
    }

    #[test]
    fn test_term_is_trimmed_and_keeps_case() {
        let term = SearchTerm::new("  Check Valve \r").unwrap();
        assert_eq!(term.as_str(), "Check Valve");
        assert_eq!(term.lowercase(), "check valve");
        assert_eq!(term.to_string(), "Check Valve");
    }

    #[test]
    fn test_parse_terms_keeps_order_and_duplicates() {
        let terms = parse_terms("Beta\r\n\n  Alpha  \n\nBeta\n");
        let names: Vec<&str> = terms.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Beta"]);
    }

    #[test]
    fn test_is_in() {
        let term = SearchTerm::new("VALVE").unwrap();
        assert!(term.is_in("check valves"));
        assert!(!term.is_in("check value"));
    }
}
