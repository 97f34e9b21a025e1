use crate::CorpusWord;
use tracing::debug;

const HEADWORD_COLUMN: usize = 2;
const FREQ_COLUMN: usize = 3;
const RANGE_COLUMN: usize = 4;

/// Parse a comma-delimited frequency listing into ranked records.
///
/// The first non-blank line is a header. Every later non-blank line takes the
/// next rank whether or not it survives filtering, so ranks keep the listing's
/// original order. Rows without a headword or with a non-positive frequency are
/// dropped silently.
pub fn parse(raw_text: &str) -> Vec<CorpusWord> {
    let mut words = Vec::new();
    let mut skipped = 0usize;

    let rows = raw_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1);

    for (index, line) in rows.enumerate() {
        let columns: Vec<&str> = line.split(',').collect();

        let headword = column(&columns, HEADWORD_COLUMN);
        let freq = parse_count(column(&columns, FREQ_COLUMN));
        let range = parse_count(column(&columns, RANGE_COLUMN));

        if headword.is_empty() || freq == 0 {
            skipped += 1;
            continue;
        }

        words.push(CorpusWord {
            headword: headword.to_string(),
            rank: index + 1,
            freq,
            range,
            norm_freq: 0.0,
            norm_range: 0.0,
        });
    }

    debug!(records = words.len(), skipped, "parsed corpus listing");
    words
}

/// Sum of `freq` across all records, saturating at `u64::MAX`.
pub fn total_tokens(words: &[CorpusWord]) -> u64 {
    words.iter().fold(0u64, |acc, w| acc.saturating_add(w.freq))
}

fn column<'a>(columns: &[&'a str], index: usize) -> &'a str {
    columns.get(index).map(|c| c.trim()).unwrap_or("")
}

fn parse_count(field: &str) -> u64 {
    field.parse().unwrap_or(0)
}
