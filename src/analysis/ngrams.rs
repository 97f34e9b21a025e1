use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NGram {
    /// Tokens joined by single spaces
    pub text: String,
    pub count: u64,
}

/// Count contiguous `n`-token sequences, most frequent first.
pub fn ngrams<S: AsRef<str>>(tokens: &[S], n: usize) -> Vec<NGram> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }

    let mut counts: HashMap<String, u64> = HashMap::new();
    for window in tokens.windows(n) {
        let text = window
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        *counts.entry(text).or_insert(0) += 1;
    }

    let mut grams: Vec<NGram> = counts
        .into_iter()
        .map(|(text, count)| NGram { text, count })
        .collect();
    grams.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
    grams
}
