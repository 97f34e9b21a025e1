pub mod dispersion;
pub mod frequency;
pub mod kwic;
pub mod ngrams;
pub mod report;
pub mod tokenizer;

pub use dispersion::{dispersion_of, Dispersion};
pub use frequency::{frequency_list, normalize};
pub use kwic::extract_context;
pub use ngrams::{ngrams, NGram};
pub use report::{CorpusReport, DemoAnalyzer};
