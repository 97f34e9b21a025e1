use crate::analysis::tokenizer::tokenize;
use crate::math::safe_divide;
use serde::{Deserialize, Serialize};

/// How evenly a term spreads across corpus segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dispersion {
    pub total: u64,
    /// Segments with at least one occurrence
    pub range: usize,
    pub segments: usize,
    /// Juilland's D in [0, 1]; 1 means perfectly even.
    pub juilland_d: f64,
    pub counts: Vec<u64>,
}

impl Dispersion {
    pub fn from_counts(counts: &[u64]) -> Self {
        let k = counts.len();
        let total = counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c));
        let range = counts.iter().filter(|&&c| c > 0).count();

        let juilland_d = if k < 2 || total == 0 {
            0.0
        } else {
            let mean = safe_divide(total as f64, k as f64);
            let squared: f64 = counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum();
            let sd = safe_divide(squared, k as f64).sqrt();
            let cv = safe_divide(sd, mean);
            (1.0 - safe_divide(cv, ((k - 1) as f64).sqrt())).clamp(0.0, 1.0)
        };

        Self {
            total,
            range,
            segments: k,
            juilland_d,
            counts: counts.to_vec(),
        }
    }
}

/// Count `term` per segment and measure its dispersion.
///
/// Terms are matched on whole lowercased tokens; a multi-word term matches
/// the same token sequence.
pub fn dispersion_of<S: AsRef<str>>(term: &str, segments: &[S]) -> Dispersion {
    let needle = tokenize(term);
    let counts: Vec<u64> = segments
        .iter()
        .map(|segment| count_sequence(&tokenize(segment.as_ref()), &needle))
        .collect();
    Dispersion::from_counts(&counts)
}

fn count_sequence(tokens: &[String], needle: &[String]) -> u64 {
    if needle.is_empty() {
        return 0;
    }
    tokens.windows(needle.len()).filter(|w| *w == needle).count() as u64
}
