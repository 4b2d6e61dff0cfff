//! Positioned text extraction from PDF using lopdf
//!
//! Walks each page's content stream and emits one fragment per text-showing
//! operator, positioned by the text matrix combined with the CTM. Fragments
//! keep content stream order.

use crate::fragments::{Page, TextFragment};
use crate::SearchError;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// TJ adjustments below this (thousandths of text space) are word gaps
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// Extract the fragments of every page of a PDF file
pub fn extract_pages<P: AsRef<Path>>(path: P) -> Result<Vec<Page>, SearchError> {
    let doc = Document::load(path)?;
    extract_pages_from_doc(&doc)
}

/// Extract the fragments of every page of a PDF held in memory
pub fn extract_pages_mem(buffer: &[u8]) -> Result<Vec<Page>, SearchError> {
    let doc = Document::load_mem(buffer)?;
    extract_pages_from_doc(&doc)
}

fn extract_pages_from_doc(doc: &Document) -> Result<Vec<Page>, SearchError> {
    let pages = doc.get_pages();
    if pages.is_empty() {
        log::debug!("document has no pages");
    }

    let mut result = Vec::with_capacity(pages.len());
    for (&number, &page_id) in pages.iter() {
        let fragments = match extract_page_fragments(doc, page_id) {
            Ok(fragments) => fragments,
            Err(e) => {
                log::warn!("page {}: unreadable content stream: {}", number, e);
                Vec::new()
            }
        };
        log::trace!("page {}: {} fragments", number, fragments.len());
        result.push(Page::new(number, fragments));
    }

    Ok(result)
}

/// Multiply two 2D transformation matrices
/// Matrix format: [a, b, c, d, e, f] representing:
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
fn multiply_matrices(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

/// Graphics and text state while walking a content stream
struct TextState<'a> {
    doc: &'a Document,
    fonts: BTreeMap<Vec<u8>, &'a Dictionary>,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    font: String,
    font_size: f32,
    leading: Option<f32>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    in_text_block: bool,
    fragments: Vec<TextFragment>,
}

impl<'a> TextState<'a> {
    fn new(doc: &'a Document, fonts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            font: String::new(),
            font_size: 12.0,
            leading: None,
            text_matrix: IDENTITY,
            line_matrix: IDENTITY,
            in_text_block: false,
            fragments: Vec::new(),
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.ctm_stack.push(self.ctm),
            "Q" => {
                if let Some(saved) = self.ctm_stack.pop() {
                    self.ctm = saved;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operand(operands) {
                    self.ctm = multiply_matrices(&m, &self.ctm);
                }
            }
            "BT" => {
                self.in_text_block = true;
                self.text_matrix = IDENTITY;
                self.line_matrix = IDENTITY;
            }
            "ET" => self.in_text_block = false,
            "Tf" => {
                if operands.len() >= 2 {
                    if let Ok(name) = operands[0].as_name() {
                        self.font = String::from_utf8_lossy(name).to_string();
                    }
                    if let Some(size) = get_number(&operands[1]) {
                        self.font_size = size;
                    }
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.leading = Some(leading);
                }
            }
            "Td" | "TD" => {
                if operands.len() >= 2 {
                    let tx = get_number(&operands[0]).unwrap_or(0.0);
                    let ty = get_number(&operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        self.leading = Some(-ty);
                    }
                    self.move_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix_operand(operands) {
                    self.text_matrix = m;
                    self.line_matrix = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(operand) = operands.first() {
                    let text = self.decode(operand);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Ok(array)) = operands.first().map(Object::as_array) {
                    let text = self.join_tj(array);
                    self.show(Some(text));
                }
            }
            "'" => {
                self.next_line();
                if let Some(operand) = operands.first() {
                    let text = self.decode(operand);
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(operand) = operands.get(2) {
                    let text = self.decode(operand);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = multiply_matrices(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Without an explicit TL, approximate the leading from the font size
        let leading = self.leading.unwrap_or(self.font_size * 1.2);
        self.move_line(0.0, -leading);
    }

    fn show(&mut self, text: Option<String>) {
        let Some(text) = text else { return };
        if !self.in_text_block || text.trim().is_empty() {
            return;
        }
        let combined = multiply_matrices(&self.text_matrix, &self.ctm);
        self.fragments
            .push(TextFragment::new(text, combined[4], combined[5]));
    }

    /// Concatenate a TJ array, turning wide negative kerns into spaces
    fn join_tj(&self, array: &[Object]) -> String {
        let mut text = String::new();
        for item in array {
            if let Some(adjustment) = get_number(item) {
                if adjustment < TJ_SPACE_THRESHOLD
                    && !text.is_empty()
                    && !text.ends_with(char::is_whitespace)
                {
                    text.push(' ');
                }
            } else if let Some(decoded) = self.decode(item) {
                text.push_str(&decoded);
            }
        }
        text
    }

    /// Decode a string operand, handling font encoding
    fn decode(&self, obj: &Object) -> Option<String> {
        let Object::String(bytes, _) = obj else {
            return None;
        };

        if let Some(font_dict) = self.fonts.get(self.font.as_bytes()) {
            if let Ok(encoding) = font_dict.get_font_encoding(self.doc) {
                if let Ok(text) = Document::decode_text(&encoding, bytes) {
                    return Some(text);
                }
            }
        }

        // Fallback: UTF-16BE with BOM, then Latin-1
        if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
            let utf16: Vec<u16> = bytes[2..]
                .chunks_exact(2)
                .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
                .collect();
            return Some(String::from_utf16_lossy(&utf16));
        }

        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Extract fragments from a single page
fn extract_page_fragments(doc: &Document, page_id: ObjectId) -> Result<Vec<TextFragment>, SearchError> {
    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
    let content_data = doc.get_page_content(page_id)?;
    let content = Content::decode(&content_data)?;

    let mut state = TextState::new(doc, fonts);
    for op in &content.operations {
        state.apply(op);
    }

    Ok(state.fragments)
}

/// Helper to get f32 from Object
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (i, operand) in operands.iter().take(6).enumerate() {
        m[i] = get_number(operand).unwrap_or(IDENTITY[i]);
    }
    Some(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_identity() {
        let m = [2.0, 0.0, 0.0, 2.0, 10.0, 20.0];
        assert_eq!(multiply_matrices(&m, &IDENTITY), m);
        assert_eq!(multiply_matrices(&IDENTITY, &m), m);
    }

    #[test]
    fn test_translation_through_scaled_ctm() {
        let translate = [1.0, 0.0, 0.0, 1.0, 5.0, 7.0];
        let scale = [2.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let combined = multiply_matrices(&translate, &scale);
        assert_eq!(combined[4], 10.0);
        assert_eq!(combined[5], 14.0);
    }

    fn tj(parts: Vec<Object>) -> String {
        let doc = Document::new();
        TextState::new(&doc, BTreeMap::new()).join_tj(&parts)
    }

    #[test]
    fn test_tj_wide_kern_becomes_space() {
        let parts = vec![
            Object::string_literal("Check"),
            Object::Integer(-300),
            Object::string_literal("valve"),
        ];
        assert_eq!(tj(parts), "Check valve");
    }

    #[test]
    fn test_tj_small_kern_and_existing_space_kept() {
        let parts = vec![
            Object::string_literal("Va"),
            Object::Real(-40.0),
            Object::string_literal("lve "),
            Object::Integer(-500),
            Object::string_literal("seal"),
            Object::Integer(120),
        ];
        assert_eq!(tj(parts), "Valve seal");
    }

    #[test]
    fn test_tj_leading_kern_adds_nothing() {
        let parts = vec![Object::Integer(-1000), Object::string_literal("due")];
        assert_eq!(tj(parts), "due");
    }

    #[test]
    fn test_get_number() {
        assert_eq!(get_number(&Object::Integer(3)), Some(3.0));
        assert_eq!(get_number(&Object::Real(1.5)), Some(1.5));
        assert_eq!(get_number(&Object::Null), None);
    }

    #[test]
    fn test_matrix_operand_needs_six_values() {
        assert!(matrix_operand(&[Object::Integer(1)]).is_none());
        let ops: Vec<Object> = [1, 0, 0, 1, 72, 700]
            .into_iter()
            .map(Object::Integer)
            .collect();
        assert_eq!(matrix_operand(&ops), Some([1.0, 0.0, 0.0, 1.0, 72.0, 700.0]));
    }
}
