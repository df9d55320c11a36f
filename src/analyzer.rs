//! Analysis of a whole directory of datasets

use crate::{
    analysis::{self, TextAnalysis},
    config::Config,
    dataset::{self, Table},
    frequency::FrequencyMap,
    report::{CumulativeReport, FileReport, Report, Reporter, WordCount},
    tokenizer::Tokenizer,
    Result,
};
use anyhow::Context;
use std::num::NonZeroUsize;

/// Statistics accumulated across all analyzed files
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CumulativeStats {
    /// Word occurences across all analyzed files
    frequencies: FrequencyMap,

    /// Sentences across all analyzed files
    num_sentences: usize,

    /// Number of analyzed files
    num_files: usize,
}
//
impl CumulativeStats {
    /// Set up empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate the analysis of one more file
    pub fn fold(&mut self, analysis: &TextAnalysis) {
        self.frequencies.merge(&analysis.frequencies);
        self.num_sentences += analysis.num_sentences();
        self.num_files += 1;
    }

    /// Word occurences across all analyzed files
    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    /// Number of sentences across all analyzed files
    pub fn num_sentences(&self) -> usize {
        self.num_sentences
    }

    /// Number of analyzed files
    pub fn num_files(&self) -> usize {
        self.num_files
    }

    /// Summarize these statistics
    pub fn report(&self, top_limit: NonZeroUsize) -> CumulativeReport {
        CumulativeReport {
            unique_words: self.frequencies.len(),
            sentences: self.num_sentences,
            top_words: WordCount::most_common(&self.frequencies, top_limit),
            top_limit,
        }
    }
}

/// Join the non-missing values of a table column into one blob of text
///
/// Returns `None` if the table has no such column.
pub fn text_blob(table: &Table, column: &str) -> Option<String> {
    let values = table.column(column)?.flatten().collect::<Vec<_>>();
    Some(values.join(" "))
}

/// Summarize the analysis of one file
pub fn file_report(file: &str, analysis: &TextAnalysis, top_limit: NonZeroUsize) -> FileReport {
    FileReport {
        file: file.into(),
        total_words: analysis.words.len(),
        unique_words: analysis.frequencies.len(),
        sentences: analysis.num_sentences(),
        top_words: WordCount::most_common(&analysis.frequencies, top_limit),
        top_limit,
    }
}

/// Analyze every dataset from the configured directory
///
/// Emits one report per dataset, in loading order, then a cumulative report
/// across all datasets that have the text column. The cumulative statistics
/// are also returned.
pub async fn analyze_datasets(
    config: &Config,
    tokenizer: &impl Tokenizer,
    reporter: &mut impl Reporter,
) -> Result<CumulativeStats> {
    let datasets = dataset::load_datasets(config)
        .await
        .context("loading the datasets")?;
    let mut cumulative = CumulativeStats::new();
    for (file, table) in datasets {
        let Some(text) = text_blob(&table, &config.column) else {
            log::warn!("Skipping {file}, which has no {:?} column", config.column);
            reporter
                .emit(&Report::Skipped {
                    file,
                    column: config.column.clone(),
                })
                .await?;
            continue;
        };
        log::debug!("Analyzing {} bytes of text from {file}", text.len());
        let analysis = analysis::analyze_text(tokenizer, &text);
        reporter
            .emit(&Report::File(file_report(&file, &analysis, config.file_top)))
            .await?;
        cumulative.fold(&analysis);
    }
    reporter
        .emit(&Report::Cumulative(cumulative.report(config.cumulative_top)))
        .await?;
    Ok(cumulative)
}
