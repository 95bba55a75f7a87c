//! Pagination engine - fixed-geometry page layout for print-style export.
//!
//! Word-wraps normalized plain text into lines no wider than the page, then
//! accumulates lines into fixed-height pages. Purely a function of its
//! inputs: identical text and geometry always produce identical page
//! boundaries. Used by the print/export surface only, never by the
//! interactive display.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

/// Fixed page dimensions in character cells.
///
/// The default matches the reference print layout: 180 monospace-equivalent
/// columns by 37 lines per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    width_chars: usize,
    height_lines: usize,
}

impl PageGeometry {
    /// Creates a validated geometry.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if either dimension is zero
    pub fn new(width_chars: usize, height_lines: usize) -> Result<Self, ValidationError> {
        if width_chars == 0 {
            return Err(ValidationError::out_of_range("page_width_chars", 1, i64::MAX, 0));
        }
        if height_lines == 0 {
            return Err(ValidationError::out_of_range("page_height_lines", 1, i64::MAX, 0));
        }
        Ok(Self {
            width_chars,
            height_lines,
        })
    }

    pub fn width_chars(&self) -> usize {
        self.width_chars
    }

    pub fn height_lines(&self) -> usize {
        self.height_lines
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width_chars: 180,
            height_lines: 37,
        }
    }
}

/// One laid-out page of wrapped text lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The page content as a single newline-joined string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Lays out plain text into pages of the given geometry.
///
/// Soft-wraps at the nearest preceding whitespace; a single token longer
/// than the width is hard-broken at the width boundary. Blank source lines
/// survive as blank layout lines. Always returns at least one page; empty
/// input yields one empty page.
pub fn paginate(plain_text: &str, geometry: PageGeometry) -> Vec<Page> {
    if plain_text.is_empty() {
        return vec![Page::default()];
    }

    let mut wrapped: Vec<String> = Vec::new();
    for source_line in plain_text.split('\n') {
        wrap_line(source_line, geometry.width_chars(), &mut wrapped);
    }

    let mut pages = Vec::new();
    for chunk in wrapped.chunks(geometry.height_lines()) {
        pages.push(Page {
            lines: chunk.to_vec(),
        });
    }
    if pages.is_empty() {
        pages.push(Page::default());
    }
    pages
}

/// Greedy word-wrap of one source line into `out`.
fn wrap_line(source: &str, width: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut produced = false;

    for word in source.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            // Hard-break an oversized token at the width boundary.
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_len = 0;
                produced = true;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == width {
                    out.push(piece);
                    produced = true;
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current.is_empty() {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            out.push(std::mem::take(&mut current));
            produced = true;
            current = word.to_string();
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        out.push(current);
        produced = true;
    }
    if !produced {
        // Preserve blank source lines so vertical structure survives.
        out.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn geo(w: usize, h: usize) -> PageGeometry {
        PageGeometry::new(w, h).unwrap()
    }

    mod geometry {
        use super::*;

        #[test]
        fn default_matches_reference_page() {
            let g = PageGeometry::default();
            assert_eq!(g.width_chars(), 180);
            assert_eq!(g.height_lines(), 37);
        }

        #[test]
        fn rejects_zero_dimensions() {
            assert!(PageGeometry::new(0, 37).is_err());
            assert!(PageGeometry::new(180, 0).is_err());
        }
    }

    mod layout {
        use super::*;

        #[test]
        fn empty_input_yields_one_empty_page() {
            let pages = paginate("", geo(20, 5));
            assert_eq!(pages.len(), 1);
            assert!(pages[0].is_empty());
        }

        #[test]
        fn soft_wraps_at_whitespace() {
            let pages = paginate("alpha beta gamma", geo(11, 5));
            assert_eq!(pages[0].lines(), ["alpha beta", "gamma"]);
        }

        #[test]
        fn hard_breaks_oversized_token() {
            let pages = paginate("abcdefghij", geo(4, 10));
            assert_eq!(pages[0].lines(), ["abcd", "efgh", "ij"]);
        }

        #[test]
        fn repeated_word_fills_multiple_full_pages() {
            let text = "word ".repeat(500);
            let pages = paginate(&text, geo(20, 5));
            assert!(pages.len() > 1);
            for page in &pages {
                assert!(page.line_count() <= 5);
                for line in page.lines() {
                    assert!(line.chars().count() <= 20);
                }
            }
            // 500 words, 4 per 20-char line ("word word word word"), 5 lines
            // per page: 125 lines over 25 pages.
            assert_eq!(pages.len(), 25);
        }

        #[test]
        fn blank_lines_survive_layout() {
            let pages = paginate("a\n\nb", geo(10, 10));
            assert_eq!(pages[0].lines(), ["a", "", "b"]);
        }

        #[test]
        fn layout_is_stable() {
            let text = "Coverage begins on the effective date.\nClaims: within 30 days.";
            let first = paginate(text, geo(18, 3));
            let second = paginate(text, geo(18, 3));
            assert_eq!(first, second);
        }

        #[test]
        fn words_recovered_in_order() {
            let text = "one two three four five six seven";
            let pages = paginate(text, geo(9, 2));
            let recovered: Vec<String> = pages
                .iter()
                .flat_map(|p| p.lines())
                .flat_map(|l| l.split_whitespace())
                .map(|w| w.to_string())
                .collect();
            let original: Vec<String> = text.split_whitespace().map(|w| w.to_string()).collect();
            assert_eq!(recovered, original);
        }
    }

    proptest! {
        #[test]
        fn pages_respect_geometry(
            words in proptest::collection::vec("[a-z]{1,15}", 0..80),
            width in 1usize..60,
            height in 1usize..10,
        ) {
            let text = words.join(" ");
            let pages = paginate(&text, geo(width, height));

            prop_assert!(!pages.is_empty());
            for page in &pages {
                prop_assert!(page.line_count() <= height);
                for line in page.lines() {
                    prop_assert!(line.chars().count() <= width);
                }
            }
        }

        #[test]
        fn characters_survive_wrapping(
            words in proptest::collection::vec("[a-z]{1,15}", 1..80),
            width in 1usize..60,
            height in 1usize..10,
        ) {
            let text = words.join(" ");
            let pages = paginate(&text, geo(width, height));

            // Reversing the wrap (dropping layout whitespace) must recover
            // every character in order, hard-broken tokens included.
            let flat: String = pages
                .iter()
                .flat_map(|p| p.lines())
                .flat_map(|l| l.chars())
                .filter(|c| !c.is_whitespace())
                .collect();
            let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(flat, expected);
        }

        #[test]
        fn word_order_preserved_when_words_fit(
            words in proptest::collection::vec("[a-z]{1,10}", 1..60),
            height in 1usize..10,
        ) {
            // Width larger than any word, so no hard breaks occur.
            let text = words.join(" ");
            let pages = paginate(&text, geo(12, height));

            let recovered: Vec<String> = pages
                .iter()
                .flat_map(|p| p.lines())
                .flat_map(|l| l.split_whitespace())
                .map(|w| w.to_string())
                .collect();
            prop_assert_eq!(recovered, words);
        }
    }
}
