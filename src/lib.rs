pub mod analysis;
pub mod cli;
pub mod config;
pub mod math;
pub mod memo;
pub mod parser;

pub use analysis::kwic::extract_context;
pub use config::Config;
pub use memo::Memo;
pub use parser::corpus::{parse, total_tokens};
pub use parser::preprocess::{preprocess, Preprocessor};

use serde::{Deserialize, Serialize};

/// One row of a frequency listing.
///
/// `norm_freq` and `norm_range` stay at 0 until
/// [`analysis::frequency::normalize`] fills them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusWord {
    pub headword: String,
    pub rank: usize,
    pub freq: u64,
    pub range: u64,
    pub norm_freq: f64,
    pub norm_range: f64,
}

/// A single concordance line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KwicResult {
    pub left_context: String,
    pub keyword: String,
    pub right_context: String,
    /// Character offset of the match in the source text.
    pub position: usize,
    /// 1-based line of the match.
    pub line_number: usize,
}
