pub mod corpus;
pub mod preprocess;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Comma-delimited `type, pos, headword, freq, range` listing
    CorpusListing,
    /// Running text (lyrics, transcripts, dictionary sources)
    PlainText,
}

impl InputKind {
    /// Detect input kind from extension
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => InputKind::CorpusListing,
            _ => InputKind::PlainText,
        }
    }
}

/// Read a whole input file as UTF-8 text
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
