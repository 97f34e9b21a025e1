use crate::analysis::tokenizer::{split_segments, tokenize};
use crate::math::{safe_divide, safe_percentage_number};
use crate::parser::corpus::total_tokens;
use crate::CorpusWord;
use std::collections::{HashMap, HashSet};

pub const PER_MILLION: f64 = 1_000_000.0;

/// Build a ranked frequency list from running text.
///
/// `range` counts the blank-line separated segments a word occurs in.
/// Ties in frequency are ordered alphabetically so ranks are stable.
pub fn frequency_list(text: &str) -> Vec<CorpusWord> {
    let mut counts: HashMap<String, (u64, u64)> = HashMap::new();

    for segment in split_segments(text) {
        let mut seen = HashSet::new();
        for token in tokenize(segment) {
            let entry = counts.entry(token.clone()).or_insert((0, 0));
            entry.0 += 1;
            if seen.insert(token) {
                entry.1 += 1;
            }
        }
    }

    let mut rows: Vec<(String, u64, u64)> = counts
        .into_iter()
        .map(|(headword, (freq, range))| (headword, freq, range))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    rows.into_iter()
        .enumerate()
        .map(|(i, (headword, freq, range))| CorpusWord {
            headword,
            rank: i + 1,
            freq,
            range,
            norm_freq: 0.0,
            norm_range: 0.0,
        })
        .collect()
}

/// Fill `norm_freq` (per million tokens) and `norm_range` (percent of segments).
///
/// A zero total leaves the corresponding normalized value at 0.
pub fn normalize(words: &mut [CorpusWord], total_tokens: u64, total_segments: u64) {
    for word in words.iter_mut() {
        word.norm_freq = safe_divide(word.freq as f64 * PER_MILLION, total_tokens as f64);
        word.norm_range = safe_percentage_number(word.range as f64, total_segments as f64);
    }
}

/// Normalize against the list's own token total.
pub fn normalize_in_place(words: &mut [CorpusWord], total_segments: u64) {
    let total = total_tokens(words);
    normalize(words, total, total_segments);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_list_ranks_by_count() {
        let text = "the sun and the moon\n\nthe sea and sky";
        let words = frequency_list(text);

        assert_eq!(words[0].headword, "the");
        assert_eq!(words[0].freq, 3);
        assert_eq!(words[0].range, 2);
        assert_eq!(words[0].rank, 1);

        assert_eq!(words[1].headword, "and");
        assert_eq!(words[1].freq, 2);
        assert_eq!(words[1].range, 2);

        // Single occurrences ordered alphabetically
        let rest: Vec<&str> = words[2..].iter().map(|w| w.headword.as_str()).collect();
        assert_eq!(rest, vec!["moon", "sea", "sky", "sun"]);
        assert_eq!(words.last().map(|w| w.rank), Some(6));
    }

    #[test]
    fn test_range_counts_segments_once() {
        let words = frequency_list("la la la\n\nla");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].freq, 4);
        assert_eq!(words[0].range, 2);
    }

    #[test]
    fn test_empty_text() {
        assert!(frequency_list("").is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut words = frequency_list("a a b c");
        normalize(&mut words, 4, 2);
        assert_eq!(words[0].norm_freq, 500_000.0);
        assert_eq!(words[0].norm_range, 50.0);
        assert_eq!(words[1].norm_freq, 250_000.0);
    }

    #[test]
    fn test_normalize_with_zero_totals() {
        let mut words = frequency_list("a b");
        normalize(&mut words, 0, 0);
        assert!(words.iter().all(|w| w.norm_freq == 0.0 && w.norm_range == 0.0));
    }

    #[test]
    fn test_normalize_in_place_uses_list_total() {
        let mut words = frequency_list("x y y y");
        normalize_in_place(&mut words, 1);
        assert_eq!(words[0].headword, "y");
        assert_eq!(words[0].norm_freq, 750_000.0);
        assert_eq!(words[0].norm_range, 100.0);
    }
}
