//! Markup normalizer - parallel views of the canonical policy text.
//!
//! Generated policies arrive in a minimal markup dialect: `**bold**`,
//! `##heading`, stray `*` emphasis markers and `---` separators, with
//! numbered lines (`1. ...`) and lines ending in `:` carrying heading
//! weight. Two pure, deterministic functions derive the views consumers
//! need:
//!
//! - [`to_display`] keeps the structure, replacing markers with per-line
//!   semantic weights for presentational rendering.
//! - [`to_plain`] strips every marker for speech synthesis and export.
//!
//! Both tolerate malformed or unbalanced markers: a stray marker is literal
//! removable punctuation, never an error.

use serde::{Deserialize, Serialize};

/// Semantic weight of one display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineWeight {
    /// `##` headings, numbered lines, and lines ending in `:`.
    Heading,
    /// Lines fully wrapped in `**...**`.
    Emphasis,
    /// Plain prose (an empty Body line is a paragraph break).
    Body,
    /// A `---` horizontal separator.
    Separator,
}

/// One line of the display view, markers removed, weight attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    pub text: String,
    pub weight: LineWeight,
}

impl DisplayLine {
    fn new(text: impl Into<String>, weight: LineWeight) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// Structured form of the canonical text for interactive presentation.
///
/// Line breaks in the source become explicit entries here, so renderers can
/// emit one paragraph per line without re-parsing anything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredText {
    lines: Vec<DisplayLine>,
}

impl StructuredText {
    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Removes `---`, `##` and `*` markers from one line.
///
/// Runs to a fixpoint: removals can themselves assemble new markers
/// (`-*-*-` becomes `---` once the stars are gone), so a single pass is not
/// enough to guarantee idempotence. Each pass strictly shortens the string
/// or stops, so the loop terminates.
fn strip_markers(line: &str) -> String {
    let mut current = line.to_string();
    loop {
        let next = current.replace("---", "").replace("##", "").replace('*', "");
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}

/// True for lines that are nothing but a horizontal rule.
fn is_separator(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// True for de-markuped lines the dialect treats as heading-weight:
/// numbered lines (`1. ...`) and lines ending in `:`.
fn is_heading_weight(clean: &str) -> bool {
    if clean.ends_with(':') {
        return true;
    }
    let digits = clean.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && clean[digits..].starts_with('.')
}

/// Converts canonical markup into the structured display view.
pub fn to_display(text: &str) -> StructuredText {
    let lines = text
        .split('\n')
        .map(|raw| {
            let trimmed = raw.trim();
            if is_separator(trimmed) {
                return DisplayLine::new("", LineWeight::Separator);
            }

            let clean = strip_markers(raw);
            let weight = if trimmed.starts_with("##") {
                LineWeight::Heading
            } else if is_heading_weight(&clean) {
                LineWeight::Heading
            } else if trimmed.len() > 4 && trimmed.starts_with("**") && trimmed.ends_with("**") {
                LineWeight::Emphasis
            } else {
                LineWeight::Body
            };
            DisplayLine::new(clean, weight)
        })
        .collect();

    StructuredText { lines }
}

/// Strips every marker, leaving pure prose with the original line structure.
///
/// Idempotent: `to_plain(to_plain(x)) == to_plain(x)`.
pub fn to_plain(text: &str) -> String {
    text.split('\n')
        .map(strip_markers)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod plain_view {
        use super::*;

        #[test]
        fn strips_all_marker_kinds() {
            let input = "## Coverage\n**Auto** protects you.\n---\n1. Liability: $50,000";
            let expected = "Coverage\nAuto protects you.\n\n1. Liability: $50,000";
            assert_eq!(to_plain(input), expected);
        }

        #[test]
        fn is_idempotent() {
            let input = "##Heading\n**bold** and *stray\n---\nplain";
            let once = to_plain(input);
            assert_eq!(to_plain(&once), once);
        }

        #[test]
        fn tolerates_unbalanced_markers() {
            assert_eq!(to_plain("**unclosed bold"), "unclosed bold");
            assert_eq!(to_plain("middle ** marker"), "middle  marker");
            assert_eq!(to_plain("*"), "");
            assert_eq!(to_plain("####"), "");
        }

        #[test]
        fn removals_cannot_assemble_new_markers() {
            // Removing the stars leaves three dashes, which must also go.
            let once = to_plain("-*-*-");
            assert!(!once.contains("---"));
            assert_eq!(to_plain(&once), once);

            // Removing ## can assemble a rule too.
            let once = to_plain("-##--");
            assert!(!once.contains("---"));
        }

        #[test]
        fn preserves_line_structure() {
            let input = "a\n\nb\nc";
            assert_eq!(to_plain(input), "a\n\nb\nc");
        }

        #[test]
        fn empty_input_stays_empty() {
            assert_eq!(to_plain(""), "");
        }
    }

    mod display_view {
        use super::*;

        #[test]
        fn classifies_hash_headings() {
            let view = to_display("## Coverage Details");
            assert_eq!(view.lines().len(), 1);
            assert_eq!(view.lines()[0].weight, LineWeight::Heading);
            assert_eq!(view.lines()[0].text, "Coverage Details");
        }

        #[test]
        fn numbered_and_colon_lines_are_heading_weight() {
            let view = to_display("1. Liability coverage\nPremium Structure:\n12.5 percent");
            assert_eq!(view.lines()[0].weight, LineWeight::Heading);
            assert_eq!(view.lines()[1].weight, LineWeight::Heading);
            // "12.5 percent" starts with digits and a dot, matching the
            // numbered-line rule of the dialect.
            assert_eq!(view.lines()[2].weight, LineWeight::Heading);
        }

        #[test]
        fn bold_wrapped_lines_are_emphasis() {
            let view = to_display("**Important notice**\nregular prose");
            assert_eq!(view.lines()[0].weight, LineWeight::Emphasis);
            assert_eq!(view.lines()[0].text, "Important notice");
            assert_eq!(view.lines()[1].weight, LineWeight::Body);
        }

        #[test]
        fn rules_become_separators() {
            let view = to_display("above\n---\nbelow\n-----");
            assert_eq!(view.lines()[1].weight, LineWeight::Separator);
            assert_eq!(view.lines()[1].text, "");
            assert_eq!(view.lines()[3].weight, LineWeight::Separator);
        }

        #[test]
        fn blank_lines_are_empty_body_paragraph_breaks() {
            let view = to_display("a\n\nb");
            assert_eq!(view.lines()[1].weight, LineWeight::Body);
            assert_eq!(view.lines()[1].text, "");
        }

        #[test]
        fn display_lines_carry_no_markers() {
            let view = to_display("## H\n**b** *x\n---");
            for line in view.lines() {
                assert!(!line.text.contains("**"));
                assert!(!line.text.contains("##"));
                assert!(!line.text.contains("---"));
            }
        }
    }

    proptest! {
        #[test]
        fn plain_view_never_contains_markers(s in "\\PC{0,200}") {
            let plain = to_plain(&s);
            prop_assert!(!plain.contains("**"));
            prop_assert!(!plain.contains("##"));
            prop_assert!(!plain.contains("---"));
            prop_assert!(!plain.contains('*'));
        }

        #[test]
        fn plain_view_is_idempotent(s in "\\PC{0,200}") {
            let once = to_plain(&s);
            prop_assert_eq!(to_plain(&once), once);
        }

        #[test]
        fn display_and_plain_agree_on_line_count(s in "[a-z #*:.\\-\n]{0,200}") {
            let display = to_display(&s);
            let plain = to_plain(&s);
            prop_assert_eq!(display.len(), plain.split('\n').count());
        }
    }
}
