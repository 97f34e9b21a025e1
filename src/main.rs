use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use corpuskit::analysis::{
    dispersion_of, extract_context, frequency, tokenizer, CorpusReport, DemoAnalyzer,
};
use corpuskit::cli::output::{self, OutputFormat};
use corpuskit::cli::{collect_inputs, process_files};
use corpuskit::parser::{corpus, read_input, InputKind};
use corpuskit::{Config, CorpusWord, Memo, Preprocessor};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "corpuskit")]
#[command(version, about = "Corpus text-analysis toolkit", long_about = None)]
struct Cli {
    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text", global = true)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (replaces the local .corpuskit.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Frequency list from corpus listings (.csv) or running text
    #[command(alias = "parse")]
    Freq {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Show only the first N headwords
        #[arg(long)]
        top: Option<usize>,

        /// Number of segments in the corpus, for range percentages of .csv listings
        #[arg(long)]
        segments: Option<u64>,
    },
    /// Key-word-in-context concordance
    Kwic {
        term: String,

        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Characters of context on each side
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// Normalize a raw dictionary source to one entry per line
    Preprocess {
        file: PathBuf,

        /// Write the normalized text here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Print entry diagnostics for the normalized text
        #[arg(long)]
        report: bool,
    },
    /// Token, type, frequency and n-gram statistics
    Stats {
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// N-gram size
        #[arg(short, long)]
        ngram: Option<usize>,

        /// Number of top entries to show
        #[arg(long)]
        top: Option<usize>,
    },
    /// How evenly a term spreads across blank-line separated segments
    Dispersion { term: String, file: PathBuf },
    /// Analyze the bundled sample corpus
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "corpuskit", &mut io::stdout());
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command specified. Use --help for usage information.");
    };

    let mut config = Config::load(cli.config.as_deref())?;
    apply_overrides(&mut config, &command);
    config.validate().context("Invalid configuration")?;
    debug!(?config, "configuration loaded");

    run(command, &config, !cli.no_color, cli.format)
}

fn apply_overrides(config: &mut Config, command: &Commands) {
    match command {
        Commands::Freq { top: Some(top), .. } => config.top_n = *top,
        Commands::Kwic {
            window: Some(window),
            ..
        } => config.window_size = *window,
        Commands::Stats { ngram, top, .. } => {
            if let Some(n) = ngram {
                config.ngram_size = *n;
            }
            if let Some(top) = top {
                config.top_n = *top;
            }
        }
        _ => {}
    }
}

fn run(command: Commands, config: &Config, colored: bool, format: OutputFormat) -> Result<()> {
    match command {
        Commands::Freq {
            files,
            top,
            segments,
        } => {
            let files = inputs(&files)?;
            let results = process_files(&files, |path, content| {
                build_frequency_list(path, content, segments)
            })?;
            for (path, (mut words, total)) in results {
                if top.is_some() {
                    words.truncate(config.top_n);
                }
                output::print_words(&path, &words, total, colored, format, config.decimals)?;
            }
        }
        Commands::Kwic { term, files, .. } => {
            let files = inputs(&files)?;
            let results = process_files(&files, |_, content| {
                extract_context(content, &term, config.window_size)
            })?;
            let mut total_matches = 0;
            for (path, lines) in &results {
                total_matches += lines.len();
                output::print_concordance(path, &term, lines, colored, format)?;
            }
            if format == OutputFormat::Text {
                output::print_concordance_summary(total_matches, &term, results.len(), colored);
            }
        }
        Commands::Preprocess { file, out, report } => {
            let raw = read_input(&file)?;
            let preprocessor = Preprocessor::from_config(config);
            let normalized = preprocessor.preprocess(&raw);

            match &out {
                Some(out_path) => {
                    fs::write(out_path, format!("{}\n", normalized)).with_context(|| {
                        format!("Failed to write file: {}", out_path.display())
                    })?;
                    info!("wrote normalized entries to {}", out_path.display());
                }
                None if !report => println!("{}", normalized),
                None => {}
            }

            if report {
                let summary = preprocessor.report(&normalized);
                output::print_preprocess_report(
                    &file,
                    &summary,
                    colored,
                    format,
                    config.decimals,
                )?;
            }
        }
        Commands::Stats { files, .. } => {
            let files = inputs(&files)?;
            let results =
                process_files(&files, |_, content| CorpusReport::build(content, config))?;
            for (path, report) in &results {
                output::print_corpus_report(path, report, colored, format, config.decimals)?;
            }
        }
        Commands::Dispersion { term, file } => {
            let text = read_input(&file)?;
            let segments = tokenizer::split_segments(&text);
            let dispersion = dispersion_of(&term, &segments);
            output::print_dispersion(
                &file,
                &term,
                &dispersion,
                colored,
                format,
                config.decimals,
            )?;
        }
        Commands::Demo => {
            let mut demo = DemoAnalyzer::new(config.clone(), Memo::new());
            let report = demo.analyze();
            output::print_corpus_report(
                Path::new("sample_corpus.txt"),
                &report,
                colored,
                format,
                config.decimals,
            )?;
        }
    }
    Ok(())
}

fn inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let files = collect_inputs(paths);
    if files.is_empty() {
        anyhow::bail!("No readable input files found.");
    }
    Ok(files)
}

fn build_frequency_list(
    path: &Path,
    content: &str,
    segments: Option<u64>,
) -> (Vec<CorpusWord>, u64) {
    match InputKind::from_path(path) {
        InputKind::CorpusListing => {
            let mut words = corpus::parse(content);
            let total = corpus::total_tokens(&words);
            // Listings do not say how many segments the corpus had; the widest
            // range is the best lower bound available.
            let segments =
                segments.unwrap_or_else(|| words.iter().map(|w| w.range).max().unwrap_or(0));
            frequency::normalize(&mut words, total, segments);
            (words, total)
        }
        InputKind::PlainText => {
            let mut words = frequency::frequency_list(content);
            let total = corpus::total_tokens(&words);
            let segments =
                segments.unwrap_or_else(|| tokenizer::split_segments(content).len() as u64);
            frequency::normalize(&mut words, total, segments);
            (words, total)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}
