//! Splitting of text into words and sentences

mod model;

pub use model::SentenceModel;

use crate::Token;
use unicode_segmentation::UnicodeSegmentation;

/// Something that can split text into words and sentences
///
/// Both operations must be deterministic functions of their input text.
pub trait Tokenizer {
    /// Split text into words, in order of appearance
    ///
    /// Punctuation marks are words of their own.
    fn words(&self, text: &str) -> Vec<Token>;

    /// Split text into sentences, in order of appearance
    ///
    /// Sentences are trimmed of surrounding whitespace.
    fn sentences(&self, text: &str) -> Vec<Box<str>>;
}

/// Tokenizer based on Unicode text segmentation rules (UAX #29)
///
/// The raw Unicode segmentation is refined with a [`SentenceModel`] so that
/// periods from abbreviations like "Mr." do not end sentences, and English
/// clitics are split off their host word ("don't" becomes "do" + "n't").
#[derive(Clone, Copy, Debug)]
pub struct UnicodeTokenizer {
    /// Abbreviation knowledge
    model: &'static SentenceModel,
}
//
impl UnicodeTokenizer {
    /// Set up a tokenizer that uses a certain sentence model
    pub fn new(model: &'static SentenceModel) -> Self {
        Self { model }
    }

    /// Locate sentences within some text
    fn sentence_spans<'text>(&self, text: &'text str) -> Vec<&'text str> {
        let mut spans = Vec::new();
        let mut push_span = |span: &'text str| {
            let span = span.trim();
            if !span.is_empty() {
                spans.push(span);
            }
        };
        let mut current_start = None;
        for (start, segment) in text.split_sentence_bound_indices() {
            let span_start = *current_start.get_or_insert(start);
            let end = start + segment.len();
            let span = &text[span_start..end];
            // A period that belongs to an abbreviation does not end the
            // sentence, so keep going until the next candidate boundary
            if self.model.ends_with_abbreviation(span, &text[end..]) {
                continue;
            }
            push_span(span);
            current_start = None;
        }
        if let Some(span_start) = current_start {
            push_span(&text[span_start..]);
        }
        spans
    }

    /// Split a single sentence into words
    fn sentence_words(&self, sentence: &str, words: &mut Vec<Token>) {
        let segments = sentence
            .split_word_bound_indices()
            .filter(|(_, segment)| !segment.chars().all(char::is_whitespace))
            .collect::<Vec<_>>();
        let mut idx = 0;
        while let Some(&(start, segment)) = segments.get(idx) {
            idx += 1;

            // Keep abbreviation periods attached, unless the period also ends
            // the sentence
            if let (Some(&(period_start, ".")), Some(&(_, following))) =
                (segments.get(idx), segments.get(idx + 1))
            {
                let is_attached = period_start == start + segment.len();
                if is_attached && self.model.is_abbreviation(segment, following) {
                    idx += 1;
                    words.push(format!("{segment}.").into());
                    continue;
                }
            }

            // Otherwise, emit the word, minus any clitic
            match split_clitic(segment) {
                (host, Some(clitic)) => {
                    log::trace!("Split clitic {clitic:?} from {segment:?}");
                    words.push(host.into());
                    words.push(clitic.into());
                }
                (word, None) => words.push(word.into()),
            }
        }
    }
}
//
impl Default for UnicodeTokenizer {
    fn default() -> Self {
        Self::new(SentenceModel::load())
    }
}
//
impl Tokenizer for UnicodeTokenizer {
    fn words(&self, text: &str) -> Vec<Token> {
        let mut words = Vec::new();
        for sentence in self.sentence_spans(text) {
            self.sentence_words(sentence, &mut words);
        }
        words
    }

    fn sentences(&self, text: &str) -> Vec<Box<str>> {
        (self.sentence_spans(text).into_iter())
            .map(Box::from)
            .collect()
    }
}

/// English clitics that are split from the word they are attached to
const CLITICS: &[&str] = &[
    "n't", "'s", "'re", "'ve", "'ll", "'d", "'m", "n’t", "’s", "’re", "’ve", "’ll", "’d", "’m",
];

/// Split a word into its host and trailing clitic, if any
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    for clitic in CLITICS {
        let Some(split) = word.len().checked_sub(clitic.len()) else {
            continue;
        };
        if split == 0 || !word.is_char_boundary(split) {
            continue;
        }
        let (host, suffix) = word.split_at(split);
        if suffix.eq_ignore_ascii_case(clitic) {
            return (host, Some(suffix));
        }
    }
    (word, None)
}
