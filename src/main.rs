//! Descriptive statistics over the free-text column of a directory of CSV
//! datasets: word and sentence counts, per-file and cumulative word
//! frequencies.

mod analysis;
mod analyzer;
mod config;
mod dataset;
mod frequency;
mod report;
mod tokenizer;
mod top;

use crate::{
    config::Config,
    report::{JsonReporter, TextReporter},
    tokenizer::{SentenceModel, UnicodeTokenizer},
};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf};

/// Word and sentence statistics for the text column of CSV datasets
///
/// Every file of DIRECTORY whose name ends with the selected extension is
/// parsed as a CSV table with a header row. For each table that has the
/// selected text column, the non-missing values of that column are joined and
/// tokenized into words and sentences, and a per-file report is printed. A
/// cumulative report over all analyzed files is printed at the end.
///
/// Tokens are counted exactly as the tokenizer produces them: "Hello" and
/// "hello" are different words, and punctuation marks are words too.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Directory to be scanned for tabular files
    ///
    /// Subdirectories are not scanned.
    #[arg(default_value = "Cleaned_datasets")]
    directory: PathBuf,

    /// Name of the column holding the text to be analyzed
    ///
    /// Tables without this column are reported as skipped.
    #[arg(short, long, default_value = "subject")]
    column: Box<str>,

    /// File name extension of the tabular files, without the leading dot
    #[arg(short, long, default_value = "csv")]
    extension: Box<str>,

    /// Number of most frequent words listed in each per-file report
    #[arg(long, default_value = "5")]
    file_top: NonZeroUsize,

    /// Number of most frequent words listed in the cumulative report
    #[arg(long, default_value = "10")]
    cumulative_top: NonZeroUsize,

    /// Report output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Process files in file name order
    ///
    /// By default, files are processed in whatever order the operating system
    /// lists them, which may differ from one machine to another.
    #[arg(long, default_value_t = false)]
    sorted: bool,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        anyhow::ensure!(!args.column.is_empty(), "text column name cannot be empty");
        anyhow::ensure!(
            !args.extension.is_empty(),
            "tabular file extension cannot be empty"
        );
        anyhow::ensure!(
            !args.extension.starts_with('.'),
            "tabular file extension should be given without its leading dot"
        );
        Ok(args)
    }
}

/// Report rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    /// Human-readable text
    Text,

    /// One JSON object per report
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging();

    // Decode CLI arguments
    let args = Args::parse_and_check()?;
    let format = args.format;
    let config = Config::new(args);

    // Load the sentence splitting model before any text gets tokenized
    let tokenizer = UnicodeTokenizer::new(SentenceModel::load());

    // Analyze the datasets, printing reports as we go
    let stdout = tokio::io::stdout();
    let cumulative = match format {
        Format::Text => {
            analyzer::analyze_datasets(&config, &tokenizer, &mut TextReporter::new(stdout)).await?
        }
        Format::Json => {
            analyzer::analyze_datasets(&config, &tokenizer, &mut JsonReporter::new(stdout)).await?
        }
    };
    log::info!(
        "Done: {} files analyzed, {} unique words, {} sentences",
        cumulative.num_files(),
        cumulative.frequencies().len(),
        cumulative.num_sentences()
    );
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Case-sensitive word token, as emitted by the tokenizer
pub type Token = Box<str>;

/// Set up logging
///
/// Logs go to syslog. Machines without a reachable syslog daemon still get
/// their reports, just without logs.
fn setup_logging() {
    let level = if cfg!(feature = "log-trace") {
        LevelFilter::Trace
    } else if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = syslog::init(syslog::Facility::LOG_USER, level, None) {
        eprintln!("warning: logging disabled, failed to connect to syslog ({e})");
    }
}
