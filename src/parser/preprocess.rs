//! Dictionary source cleanup.
//!
//! Raw dictionary dumps wrap one headword's definition over several physical
//! lines, prefix lines with `N: ` numbering and open with a title/author
//! preamble. [`Preprocessor::preprocess`] turns that into one entry per line.

use crate::config::Config;
use crate::math::safe_divide;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_ENTRY_MARKER: &str = "•";
pub const DEFAULT_METADATA_PREFIXES: [&str; 2] = ["title", "author"];
pub const DEFAULT_SAMPLE_LENGTH: usize = 500;

lazy_static! {
    static ref LINE_NUMBER_PREFIX: Regex = Regex::new(r"^\s*\d+:\s*").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SkippingPreamble,
    InContent,
}

#[derive(Debug, Clone)]
pub struct Preprocessor {
    marker: String,
    metadata_prefixes: Vec<String>,
    sample_length: usize,
}

/// Descriptive statistics over preprocessed (or raw) dictionary text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessReport {
    /// Lines containing the entry marker
    pub entry_count: usize,
    /// Non-empty lines
    pub line_count: usize,
    pub average_line_length: f64,
    pub sample: String,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRY_MARKER,
            DEFAULT_METADATA_PREFIXES.iter().map(|p| p.to_string()).collect(),
        )
    }
}

impl Preprocessor {
    pub fn new(marker: impl Into<String>, metadata_prefixes: Vec<String>) -> Self {
        Self {
            marker: marker.into(),
            metadata_prefixes: metadata_prefixes
                .into_iter()
                .map(|p| p.to_lowercase())
                .collect(),
            sample_length: DEFAULT_SAMPLE_LENGTH,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.entry_marker.clone(), config.metadata_prefixes.clone())
            .with_sample_length(config.sample_length)
    }

    pub fn with_sample_length(mut self, sample_length: usize) -> Self {
        self.sample_length = sample_length;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Normalize raw dictionary text to one logical entry per line.
    pub fn preprocess(&self, raw_content: &str) -> String {
        let mut state = State::SkippingPreamble;
        let mut current: Option<String> = None;
        let mut entries: Vec<String> = Vec::new();

        for line in raw_content.split('\n') {
            state = match state {
                State::SkippingPreamble if self.opens_content(line) => State::InContent,
                State::SkippingPreamble => continue,
                State::InContent => State::InContent,
            };

            if line.trim().is_empty() {
                flush(&mut current, &mut entries);
                continue;
            }

            let line = strip_line_number(line);
            if line.contains(self.marker.as_str()) {
                flush(&mut current, &mut entries);
                current = Some(line.to_string());
            } else {
                match current.as_mut() {
                    Some(entry) => {
                        entry.push(' ');
                        entry.push_str(line);
                    }
                    None => current = Some(line.to_string()),
                }
            }
        }
        flush(&mut current, &mut entries);

        if state == State::SkippingPreamble {
            debug!(marker = %self.marker, "no entry marker found, output is empty");
        }

        let lines: Vec<String> = entries
            .iter()
            .map(|entry| collapse_whitespace(entry))
            .filter(|entry| !entry.is_empty())
            .collect();

        debug!(entries = lines.len(), "preprocessed dictionary text");
        lines.join("\n")
    }

    pub fn report(&self, text: &str) -> PreprocessReport {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let entry_count = lines
            .iter()
            .filter(|l| l.contains(self.marker.as_str()))
            .count();
        let total_chars: usize = lines.iter().map(|l| l.chars().count()).sum();

        PreprocessReport {
            entry_count,
            line_count: lines.len(),
            average_line_length: safe_divide(total_chars as f64, lines.len() as f64),
            sample: text.chars().take(self.sample_length).collect(),
        }
    }

    fn opens_content(&self, line: &str) -> bool {
        let line = strip_line_number(line).trim();
        line.contains(self.marker.as_str()) && !self.is_metadata(line)
    }

    /// A metadata prefix only counts as a whole word: `Title:` and `AUTHOR •`
    /// match `title`/`author`, `titles` and `authority` do not.
    fn is_metadata(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.metadata_prefixes.iter().any(|prefix| {
            !prefix.is_empty()
                && lower
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric()))
        })
    }
}

/// Preprocess with the default `•` marker and title/author preamble detection.
pub fn preprocess(raw_content: &str) -> String {
    Preprocessor::default().preprocess(raw_content)
}

fn flush(current: &mut Option<String>, entries: &mut Vec<String>) {
    if let Some(entry) = current.take() {
        entries.push(entry);
    }
}

fn strip_line_number(line: &str) -> &str {
    match LINE_NUMBER_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
