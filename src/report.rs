//! Match records and report rendering

use serde::Serialize;

use crate::terms::SearchTerm;

/// One occurrence of a search term on a reconstructed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub search_term: SearchTerm,
    /// Page number (1-indexed)
    pub page: u32,
    /// 1-based line position within the page
    pub serial: usize,
    pub matched_line: String,
    /// Page heading lines, or a single fallback label
    pub page_heading: Vec<String>,
    /// Never empty; a placeholder stands in for a missing remark
    pub remark: String,
}

/// Ordered match records of one search run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<MatchRecord>,
}

impl Report {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }

    /// Status line for the finished search
    pub fn summary(&self) -> String {
        format!("Search completed. {} matches found.", self.records.len())
    }

    /// Render as a markdown table of headings and matched lines
    pub fn to_markdown(&self) -> String {
        if self.records.is_empty() {
            return "No matches found.\n".to_string();
        }

        let mut output = String::from("| Details | Matched Record |\n| --- | --- |\n");
        for record in &self.records {
            let details = record
                .page_heading
                .iter()
                .map(|h| escape_cell(h))
                .collect::<Vec<_>>()
                .join("<br>");
            output.push_str(&format!(
                "| {} | {} |\n",
                details,
                escape_cell(&record.matched_line)
            ));
        }
        output
    }

    /// Render one record per line with all fields
    pub fn to_text(&self) -> String {
        if self.records.is_empty() {
            return "No matches found.\n".to_string();
        }

        let mut output = String::new();
        for record in &self.records {
            output.push_str(&format!(
                "[{}] page {} line {}: {}\n    heading: {}\n    remarks: {}\n",
                record.search_term,
                record.page,
                record.serial,
                record.matched_line,
                record.page_heading.join(" / "),
                record.remark
            ));
        }
        output
    }

    /// Render as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for Report {
    type Item = MatchRecord;
    type IntoIter = std::vec::IntoIter<MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, page: u32, line: &str) -> MatchRecord {
        MatchRecord {
            search_term: SearchTerm::new(term).unwrap(),
            page,
            serial: 1,
            matched_line: line.to_string(),
            page_heading: vec!["Manual".into(), "Section 2".into()],
            remark: "—".to_string(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(report.to_markdown(), "No matches found.\n");
        assert_eq!(report.summary(), "Search completed. 0 matches found.");
        assert_eq!(report.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_markdown_table() {
        let report = Report::new(vec![record("valve", 3, "Valve | A")]);
        let md = report.to_markdown();
        assert!(md.starts_with("| Details | Matched Record |"));
        assert!(md.contains("| Manual<br>Section 2 | Valve \\| A |"));
    }

    #[test]
    fn test_json_fields() {
        let report = Report::new(vec![record("Valve", 3, "Valve status")]);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["search_term"], "Valve");
        assert_eq!(value[0]["page"], 3);
        assert_eq!(value[0]["serial"], 1);
        assert_eq!(value[0]["page_heading"][1], "Section 2");
        assert_eq!(value[0]["remark"], "—");
    }

    #[test]
    fn test_text_rendering() {
        let report = Report::new(vec![record("valve", 2, "Valve status")]);
        let text = report.to_text();
        assert!(text.contains("[valve] page 2 line 1: Valve status"));
        assert!(text.contains("heading: Manual / Section 2"));
    }
}
