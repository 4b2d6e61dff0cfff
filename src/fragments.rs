//! Positioned text fragments and the pages that own them

/// A run of text with its position on the page
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// The text content, as emitted by the extractor
    pub text: String,
    /// X position on page
    pub x: f32,
    /// Y position on page (PDF coordinates, origin at bottom-left)
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// Whether both coordinates are usable for layout decisions
    pub fn has_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// All fragments of one page, in content stream order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    pub fragments: Vec<TextFragment>,
}

impl Page {
    pub fn new(number: u32, fragments: Vec<TextFragment>) -> Self {
        Self { number, fragments }
    }

    /// Build pages numbered 1..=n from raw fragment lists
    pub fn from_fragment_lists(lists: Vec<Vec<TextFragment>>) -> Vec<Page> {
        lists
            .into_iter()
            .zip(1u32..)
            .map(|(fragments, number)| Page::new(number, fragments))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_position() {
        assert!(TextFragment::new("a", 0.0, 10.0).has_position());
        assert!(!TextFragment::new("a", f32::NAN, 10.0).has_position());
        assert!(!TextFragment::new("a", 0.0, f32::INFINITY).has_position());
    }

    #[test]
    fn test_pages_are_numbered_from_one() {
        let pages = Page::from_fragment_lists(vec![vec![], vec![TextFragment::new("x", 1.0, 2.0)]]);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].fragments.len(), 1);
    }
}
