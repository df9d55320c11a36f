//! Reports emitted by the dataset analysis

use crate::{frequency::FrequencyMap, Result};
use anyhow::Context;
use serde::Serialize;
use std::{
    fmt::{self, Display, Formatter},
    num::NonZeroUsize,
};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Something that the dataset analysis has to say
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Statistics about one analyzed file
    File(FileReport),

    /// A file was not analyzed because it lacks the text column
    Skipped {
        /// Name of the skipped file
        file: Box<str>,

        /// Name of the missing column
        column: Box<str>,
    },

    /// Statistics across all analyzed files
    Cumulative(CumulativeReport),
}
//
impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(report) => {
                writeln!(f)?;
                writeln!(f, "Analysis for {}:", report.file)?;
                writeln!(f, " - Total words: {}", report.total_words)?;
                writeln!(f, " - Unique words: {}", report.unique_words)?;
                writeln!(f, " - Total sentences: {}", report.sentences)?;
                write!(
                    f,
                    " - Top {} words: {}",
                    report.top_limit,
                    WordList(&report.top_words)
                )
            }
            Self::Skipped { file, column } => {
                writeln!(f)?;
                write!(f, "Skipping {file} - No '{column}' column found.")
            }
            Self::Cumulative(report) => {
                writeln!(f)?;
                writeln!(f, "Cumulative Analysis Across All Datasets:")?;
                writeln!(f, " - Total unique words: {}", report.unique_words)?;
                writeln!(f, " - Total sentences: {}", report.sentences)?;
                write!(
                    f,
                    " - Top {} words: {}",
                    report.top_limit,
                    WordList(&report.top_words)
                )
            }
        }
    }
}

/// Statistics about one analyzed file
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FileReport {
    /// Name of the file
    pub file: Box<str>,

    /// Number of words, including repeated words and punctuation
    pub total_words: usize,

    /// Number of distinct words
    pub unique_words: usize,

    /// Number of sentences
    pub sentences: usize,

    /// Most frequent words, by decreasing number of occurences
    pub top_words: Vec<WordCount>,

    /// Maximal length of `top_words`
    #[serde(skip)]
    pub top_limit: NonZeroUsize,
}

/// Statistics across all analyzed files
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CumulativeReport {
    /// Number of distinct words
    pub unique_words: usize,

    /// Number of sentences
    pub sentences: usize,

    /// Most frequent words, by decreasing number of occurences
    pub top_words: Vec<WordCount>,

    /// Maximal length of `top_words`
    #[serde(skip)]
    pub top_limit: NonZeroUsize,
}

/// A word and its number of occurences
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WordCount {
    pub word: Box<str>,
    pub count: usize,
}
//
impl WordCount {
    /// Most frequent words of a frequency map
    pub fn most_common(frequencies: &FrequencyMap, max_len: NonZeroUsize) -> Vec<Self> {
        (frequencies.most_common(max_len).into_iter())
            .map(|(word, count)| Self {
                word: word.into(),
                count,
            })
            .collect()
    }
}

/// Display a list of words and counts as `[('word', count), ...]`
struct WordList<'a>(&'a [WordCount]);
//
impl Display for WordList<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, WordCount { word, count }) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {count})", QuotedWord(word))?;
        }
        write!(f, "]")
    }
}

/// Display a word as a quoted string literal
///
/// Single quotes are used, unless the word contains single quotes but no
/// double quotes.
struct QuotedWord<'a>(&'a str);
//
impl Display for QuotedWord<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains('\'') && !self.0.contains('"') {
            '"'
        } else {
            '\''
        };
        write!(f, "{quote}")?;
        for c in self.0.chars() {
            match c {
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                c if c == quote => write!(f, "\\{c}")?,
                c if c.is_control() && u32::from(c) < 0x100 => {
                    write!(f, "\\x{:02x}", u32::from(c))?
                }
                c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "{quote}")
    }
}

/// Destination of analysis reports
#[allow(async_fn_in_trait)]
pub trait Reporter {
    /// Emit a report
    async fn emit(&mut self, report: &Report) -> Result<()>;
}

/// Human-readable reports
#[derive(Debug)]
pub struct TextReporter<W: AsyncWrite + Unpin> {
    out: BufWriter<W>,
}
//
impl<W: AsyncWrite + Unpin> TextReporter<W> {
    /// Set up a reporter that writes into some output
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Get back the underlying output
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}
//
impl<W: AsyncWrite + Unpin> Reporter for TextReporter<W> {
    async fn emit(&mut self, report: &Report) -> Result<()> {
        let text = format!("{report}\n");
        self.out
            .write_all(text.as_bytes())
            .await
            .context("writing out a report")?;
        self.out.flush().await.context("flushing report output")?;
        Ok(())
    }
}

/// Machine-readable reports, as one JSON object per line
#[derive(Debug)]
pub struct JsonReporter<W: AsyncWrite + Unpin> {
    out: BufWriter<W>,
}
//
impl<W: AsyncWrite + Unpin> JsonReporter<W> {
    /// Set up a reporter that writes into some output
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Get back the underlying output
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}
//
impl<W: AsyncWrite + Unpin> Reporter for JsonReporter<W> {
    async fn emit(&mut self, report: &Report) -> Result<()> {
        let mut json = serde_json::to_vec(report).context("converting a report to JSON")?;
        json.push(b'\n');
        self.out
            .write_all(&json)
            .await
            .context("writing out a report")?;
        self.out.flush().await.context("flushing report output")?;
        Ok(())
    }
}

/// Reporter that keeps reports around for later inspection
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectReporter(pub Vec<Report>);
//
#[cfg(test)]
impl Reporter for CollectReporter {
    async fn emit(&mut self, report: &Report) -> Result<()> {
        self.0.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_report() -> Report {
        Report::File(FileReport {
            file: "a.csv".into(),
            total_words: 6,
            unique_words: 4,
            sentences: 2,
            top_words: vec![
                WordCount {
                    word: "Hello".into(),
                    count: 2,
                },
                WordCount {
                    word: "'s".into(),
                    count: 1,
                },
            ],
            top_limit: NonZeroUsize::new(5).unwrap(),
        })
    }

    #[test]
    fn text_layout() {
        assert_eq!(
            file_report().to_string(),
            "\nAnalysis for a.csv:\n - Total words: 6\n - Unique words: 4\n - Total sentences: 2\n - Top 5 words: [('Hello', 2), (\"'s\", 1)]"
        );
        let skipped = Report::Skipped {
            file: "b.csv".into(),
            column: "subject".into(),
        };
        assert_eq!(
            skipped.to_string(),
            "\nSkipping b.csv - No 'subject' column found."
        );
        let cumulative = Report::Cumulative(CumulativeReport {
            unique_words: 0,
            sentences: 0,
            top_words: Vec::new(),
            top_limit: NonZeroUsize::new(10).unwrap(),
        });
        assert_eq!(
            cumulative.to_string(),
            "\nCumulative Analysis Across All Datasets:\n - Total unique words: 0\n - Total sentences: 0\n - Top 10 words: []"
        );
    }

    #[test]
    fn quoted_words() {
        let quoted = |word: &str| QuotedWord(word).to_string();
        assert_eq!(quoted("Hello"), "'Hello'");
        assert_eq!(quoted("n't"), "\"n't\"");
        assert_eq!(quoted("\""), "'\"'");
        assert_eq!(quoted("'\""), "'\\'\"'");
        assert_eq!(quoted("a\\b"), "'a\\\\b'");
        assert_eq!(quoted("\u{1}"), "'\\x01'");
    }

    #[tokio::test]
    async fn text_reporter() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.emit(&file_report()).await.unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(text, format!("{}\n", file_report()));
    }

    #[tokio::test]
    async fn json_reporter() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.emit(&file_report()).await.unwrap();
        reporter
            .emit(&Report::Skipped {
                file: "b.csv".into(),
                column: "subject".into(),
            })
            .await
            .unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        let file: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(file["kind"], "file");
        assert_eq!(file["file"], "a.csv");
        assert_eq!(file["total_words"], 6);
        assert_eq!(file["top_words"][0]["word"], "Hello");
        assert_eq!(file["top_words"][0]["count"], 2);
        assert!(file.get("top_limit").is_none());
        let skipped: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(skipped["kind"], "skipped");
        assert_eq!(skipped["column"], "subject");
    }
}
