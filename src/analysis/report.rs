use crate::analysis::frequency::{frequency_list, normalize};
use crate::analysis::ngrams::{ngrams, NGram};
use crate::analysis::tokenizer::{split_segments, tokenize};
use crate::math::safe_percentage;
use crate::memo::Memo;
use crate::parser::corpus::total_tokens;
use crate::{Config, CorpusWord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Small lyric corpus shipped with the crate for the demo analysis.
pub static SAMPLE_CORPUS: &str = include_str!("../../data/sample_corpus.txt");

/// Summary statistics for one body of running text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusReport {
    pub total_tokens: u64,
    pub distinct_types: usize,
    /// Distinct types as a percentage of tokens, formatted
    pub type_token_ratio: String,
    pub segments: usize,
    pub ngram_size: usize,
    pub top_words: Vec<CorpusWord>,
    pub top_ngrams: Vec<NGram>,
}

impl CorpusReport {
    pub fn build(text: &str, config: &Config) -> Self {
        let segments = split_segments(text).len();
        let mut words = frequency_list(text);
        let total = total_tokens(&words);
        normalize(&mut words, total, segments as u64);

        let distinct_types = words.len();
        words.truncate(config.top_n);

        let tokens = tokenize(text);
        let mut top_ngrams = ngrams(&tokens, config.ngram_size);
        top_ngrams.truncate(config.top_n);

        Self {
            total_tokens: total,
            distinct_types,
            type_token_ratio: safe_percentage(
                distinct_types as f64,
                total as f64,
                config.decimals,
            ),
            segments,
            ngram_size: config.ngram_size,
            top_words: words,
            top_ngrams,
        }
    }
}

/// Runs the report over [`SAMPLE_CORPUS`] once and serves the cached result.
pub struct DemoAnalyzer {
    config: Config,
    cache: Memo<CorpusReport>,
}

impl DemoAnalyzer {
    pub fn new(config: Config, cache: Memo<CorpusReport>) -> Self {
        Self { config, cache }
    }

    pub fn analyze(&mut self) -> Arc<CorpusReport> {
        let config = &self.config;
        self.cache.get_or_compute(|| {
            info!("running demo analysis over sample corpus");
            CorpusReport::build(SAMPLE_CORPUS, config)
        })
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
