use crate::analysis::{CorpusReport, Dispersion};
use crate::parser::preprocess::PreprocessReport;
use crate::{CorpusWord, KwicResult};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonWords<'a> {
    file: String,
    total_tokens: u64,
    words: &'a [CorpusWord],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonConcordance<'a> {
    file: String,
    term: &'a str,
    total_matches: usize,
    results: &'a [KwicResult],
}

#[derive(Debug, Serialize)]
struct JsonFileReport<'a, T: Serialize> {
    file: String,
    #[serde(flatten)]
    report: &'a T,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_header(file_path: &Path, colored_output: bool) {
    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }
}

pub fn print_words(
    file_path: &Path,
    words: &[CorpusWord],
    total_tokens: u64,
    colored_output: bool,
    format: OutputFormat,
    decimals: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonWords {
            file: file_path.display().to_string(),
            total_tokens,
            words,
        }),
        OutputFormat::Text => {
            print_header(file_path, colored_output);
            print_word_table(words, colored_output, decimals);
            let summary = format!("{} tokens, {} headwords", total_tokens, words.len());
            if colored_output {
                println!("  {}", summary.dimmed());
            } else {
                println!("  {}", summary);
            }
            Ok(())
        }
    }
}

fn print_word_table(words: &[CorpusWord], colored_output: bool, decimals: usize) {
    let width = words
        .iter()
        .map(|w| w.headword.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let header = format!(
        "{:>5}  {:<width$}  {:>8}  {:>6}  {:>12}  {:>7}",
        "rank", "headword", "freq", "range", "per million", "range %",
        width = width
    );
    if colored_output {
        println!("  {}", header.dimmed());
    } else {
        println!("  {}", header);
    }

    for word in words {
        let headword = format!("{:<width$}", word.headword, width = width);
        let headword = if colored_output {
            headword.cyan().bold().to_string()
        } else {
            headword
        };
        println!(
            "  {:>5}  {}  {:>8}  {:>6}  {:>12.*}  {:>7.*}",
            word.rank,
            headword,
            word.freq,
            word.range,
            decimals,
            word.norm_freq,
            decimals,
            word.norm_range
        );
    }
}

pub fn print_concordance(
    file_path: &Path,
    term: &str,
    results: &[KwicResult],
    colored_output: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonConcordance {
            file: file_path.display().to_string(),
            term,
            total_matches: results.len(),
            results,
        }),
        OutputFormat::Text => {
            if results.is_empty() {
                return Ok(());
            }
            print_header(file_path, colored_output);
            for result in results {
                let location = format!("{}:{}", result.line_number, result.position);
                if colored_output {
                    println!(
                        "  {} {} {} {}",
                        location.blue().bold(),
                        result.left_context.dimmed(),
                        result.keyword.red().bold(),
                        result.right_context.dimmed()
                    );
                } else {
                    println!(
                        "  {} {} [{}] {}",
                        location, result.left_context, result.keyword, result.right_context
                    );
                }
            }
            Ok(())
        }
    }
}

pub fn print_concordance_summary(total_matches: usize, term: &str, files: usize, colored: bool) {
    println!();
    let match_word = if total_matches == 1 { "match" } else { "matches" };
    let file_word = if files == 1 { "file" } else { "files" };
    if total_matches == 0 {
        let message = format!("No matches for '{}'", term);
        if colored {
            println!("{}", message.yellow().bold());
        } else {
            println!("{}", message);
        }
    } else if colored {
        println!(
            "{} {} {} for '{}' in {} {}",
            "✓".green().bold(),
            total_matches.to_string().green().bold(),
            match_word,
            term,
            files,
            file_word
        );
    } else {
        println!(
            "✓ {} {} for '{}' in {} {}",
            total_matches, match_word, term, files, file_word
        );
    }
}

pub fn print_preprocess_report(
    file_path: &Path,
    report: &PreprocessReport,
    colored_output: bool,
    format: OutputFormat,
    decimals: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonFileReport {
            file: file_path.display().to_string(),
            report,
        }),
        OutputFormat::Text => {
            print_header(file_path, colored_output);
            if report.entry_count == 0 {
                let warning = "No entries found; check the entry marker";
                if colored_output {
                    println!("  {}", warning.yellow().bold());
                } else {
                    println!("  {}", warning);
                }
            }
            println!("  Entries: {}", report.entry_count);
            println!("  Lines: {}", report.line_count);
            println!(
                "  Average line length: {:.*}",
                decimals, report.average_line_length
            );
            println!("  Sample:");
            for line in report.sample.lines() {
                println!("    {}", line);
            }
            Ok(())
        }
    }
}

pub fn print_corpus_report(
    file_path: &Path,
    report: &CorpusReport,
    colored_output: bool,
    format: OutputFormat,
    decimals: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonFileReport {
            file: file_path.display().to_string(),
            report,
        }),
        OutputFormat::Text => {
            print_header(file_path, colored_output);
            println!("  Tokens: {}", report.total_tokens);
            println!("  Types: {}", report.distinct_types);
            println!("  Type/token ratio: {}%", report.type_token_ratio);
            println!("  Segments: {}", report.segments);
            println!();
            print_word_table(&report.top_words, colored_output, decimals);

            if !report.top_ngrams.is_empty() {
                println!();
                let title = format!("Top {}-grams", report.ngram_size);
                if colored_output {
                    println!("  {}", title.cyan().bold());
                } else {
                    println!("  {}", title);
                }
                for gram in &report.top_ngrams {
                    println!("  {:>6}  {}", gram.count, gram.text);
                }
            }
            Ok(())
        }
    }
}

pub fn print_dispersion(
    file_path: &Path,
    term: &str,
    dispersion: &Dispersion,
    colored_output: bool,
    format: OutputFormat,
    decimals: usize,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&JsonFileReport {
            file: file_path.display().to_string(),
            report: dispersion,
        }),
        OutputFormat::Text => {
            print_header(file_path, colored_output);
            let term = if colored_output {
                term.red().bold().to_string()
            } else {
                term.to_string()
            };
            println!("  Term: {}", term);
            println!("  Occurrences: {}", dispersion.total);
            println!("  Range: {}/{}", dispersion.range, dispersion.segments);
            println!("  Juilland's D: {:.*}", decimals + 2, dispersion.juilland_d);
            Ok(())
        }
    }
}
