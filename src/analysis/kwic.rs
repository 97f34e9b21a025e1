//! Key-word-in-context extraction.
//!
//! Matching is case-insensitive but every emitted string is sliced from the
//! source text, so original casing survives. Scanning never overlaps: after a
//! match the search resumes at the end of that match, which means `"aa"` finds
//! one hit in `"aaa"` and two in `"aaaa"`.

use crate::KwicResult;
use regex::RegexBuilder;
use tracing::{debug, warn};

pub const DEFAULT_WINDOW_SIZE: usize = 50;
pub const TRUNCATION_MARKER: &str = "…";

/// Find every occurrence of `term` in `text` with `window_size` characters of
/// context on each side.
pub fn extract_context(text: &str, term: &str, window_size: usize) -> Vec<KwicResult> {
    if text.is_empty() || term.is_empty() {
        return Vec::new();
    }

    let matcher = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            warn!("Cannot build matcher for term '{}': {}", term, e);
            return Vec::new();
        }
    };

    let mut results = Vec::new();
    let mut cursor = Cursor::default();

    for m in matcher.find_iter(text) {
        cursor.advance_to(text, m.start());

        let left_start = step_back(text, m.start(), window_size);
        let right_end = step_forward(text, m.end(), window_size);

        let mut left_context = text[left_start..m.start()].trim().to_string();
        if left_start > 0 {
            left_context.insert_str(0, TRUNCATION_MARKER);
        }

        let mut right_context = text[m.end()..right_end].trim().to_string();
        if right_end < text.len() {
            right_context.push_str(TRUNCATION_MARKER);
        }

        results.push(KwicResult {
            left_context,
            keyword: m.as_str().to_string(),
            right_context,
            position: cursor.chars,
            line_number: cursor.line,
        });
    }

    debug!(term, matches = results.len(), "extracted concordance lines");
    results
}

/// Running character and line count, so positions are computed in one pass.
struct Cursor {
    byte: usize,
    chars: usize,
    line: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            byte: 0,
            chars: 0,
            line: 1,
        }
    }
}

impl Cursor {
    fn advance_to(&mut self, text: &str, byte: usize) {
        let skipped = &text[self.byte..byte];
        self.chars += skipped.chars().count();
        self.line += skipped.matches('\n').count();
        self.byte = byte;
    }
}

/// Byte index `count` characters before `from`, clipped at 0.
fn step_back(text: &str, from: usize, count: usize) -> usize {
    if count == 0 {
        return from;
    }
    text[..from]
        .char_indices()
        .rev()
        .take(count)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(from)
}

/// Byte index `count` characters after `from`, clipped at the end of `text`.
fn step_forward(text: &str, from: usize, count: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(count)
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_matches_with_small_window() {
        let results = extract_context("the cat sat on the mat", "the", 3);
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].position, 0);
        assert_eq!(results[0].left_context, "");
        assert_eq!(results[0].keyword, "the");
        assert_eq!(results[0].right_context, "ca…");

        assert_eq!(results[1].position, 15);
        assert_eq!(results[1].left_context, "…on");
        assert_eq!(results[1].right_context, "ma…");
        assert_eq!(results[1].line_number, 1);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(extract_context("", "cat", DEFAULT_WINDOW_SIZE).is_empty());
        assert!(extract_context("cat", "", DEFAULT_WINDOW_SIZE).is_empty());
    }

    #[test]
    fn test_case_insensitive_match_keeps_source_casing() {
        let results = extract_context("Love me. LOVE you. love", "Love", 50);
        let keywords: Vec<&str> = results.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["Love", "LOVE", "love"]);
        assert!(results.iter().all(|r| !r.left_context.starts_with(TRUNCATION_MARKER)));
        assert!(results.iter().all(|r| !r.right_context.ends_with(TRUNCATION_MARKER)));
    }

    #[test]
    fn test_non_overlapping_scan() {
        assert_eq!(extract_context("aaa", "aa", 5).len(), 1);

        let results = extract_context("aaaa", "aa", 5);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 0);
        assert_eq!(results[1].position, 2);
    }

    #[test]
    fn test_line_numbers() {
        let text = "first line\nsecond has cat\n\nfourth cat here";
        let results = extract_context(text, "cat", 4);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].line_number, 2);
        assert_eq!(results[1].line_number, 4);
        assert_eq!(results[1].position, text.find("cat here").unwrap());
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let text = "café – naïve café";
        let results = extract_context(text, "CAFÉ", 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 0);
        assert_eq!(results[1].position, 13);
        assert_eq!(results[1].keyword, "café");
        assert_eq!(results[1].left_context, "…e");
    }

    #[test]
    fn test_context_is_trimmed_before_markers() {
        let results = extract_context("xx   word   yy", "word", 4);
        assert_eq!(results[0].left_context, "…x");
        assert_eq!(results[0].right_context, "y…");
    }

    #[test]
    fn test_zero_window() {
        let results = extract_context("a cat b", "cat", 0);
        assert_eq!(results[0].left_context, TRUNCATION_MARKER);
        assert_eq!(results[0].right_context, TRUNCATION_MARKER);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let results = extract_context("cost is $5.00 (approx)", "$5.00 (", 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "$5.00 (");
    }
}
