//! Linguistic knowledge used to refine Unicode text segmentation

use std::{collections::HashSet, sync::OnceLock};

/// Knowledge needed to tell sentence ends from abbreviation periods
///
/// Some abbreviations, like "Mr.", are never the last word of a sentence. The
/// period that follows them is always an abbreviation period.
///
/// Others, like "No." or "Sun.", are spelled like words that can end a
/// sentence. For these, the period is only considered an abbreviation period
/// if the next token does not look like the start of a new sentence, i.e. if
/// it starts with a lowercase letter or a digit ("No. 5", "Sun. 3 Jan").
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentenceModel {
    /// Lowercase abbreviations that never end a sentence, without their
    /// final period
    abbreviations: HashSet<&'static str>,

    /// Lowercase abbreviations that may also be sentence-final words, without
    /// their final period
    ambiguous: HashSet<&'static str>,
}
//
impl SentenceModel {
    /// Load the model
    ///
    /// The model is built on first call and shared afterwards, so calling this
    /// more than once is cheap.
    pub fn load() -> &'static Self {
        static MODEL: OnceLock<SentenceModel> = OnceLock::new();
        let mut loaded = false;
        let model = MODEL.get_or_init(|| {
            loaded = true;
            Self {
                abbreviations: ABBREVIATIONS.iter().copied().collect(),
                ambiguous: AMBIGUOUS_ABBREVIATIONS.iter().copied().collect(),
            }
        });
        if loaded {
            log::debug!(
                "Loaded sentence model with {} abbreviations and {} ambiguous abbreviations",
                model.abbreviations.len(),
                model.ambiguous.len()
            );
        }
        model
    }

    /// Truth that a word followed by a period is an abbreviation
    ///
    /// `word` should not include the period itself, and `following` is the
    /// text that comes after the period. Matching is case-insensitive.
    pub fn is_abbreviation(&self, word: &str, following: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let lowercase;
        let word = if word.chars().any(char::is_uppercase) {
            lowercase = word.to_lowercase();
            &*lowercase
        } else {
            word
        };
        if self.abbreviations.contains(word) {
            return true;
        }
        self.ambiguous.contains(word) && continues_sentence(following)
    }

    /// Truth that a sentence candidate ends with an abbreviation rather than a
    /// sentence terminator
    ///
    /// `following` is the text that comes after the sentence candidate.
    pub fn ends_with_abbreviation(&self, sentence: &str, following: &str) -> bool {
        let Some(without_period) = sentence.trim_end().strip_suffix('.') else {
            return false;
        };
        let last_word = without_period
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or(without_period)
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        self.is_abbreviation(last_word, following)
    }
}

/// Truth that some text does not look like the start of a new sentence
fn continues_sentence(following: &str) -> bool {
    following
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_lowercase() || c.is_numeric())
}

/// Common English abbreviations which are not also common words
const ABBREVIATIONS: &[&str] = &[
    // Titles
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "rev", "hon", "gov", "lt", "sgt", "capt",
    "cmdr", "adm", "pres", "supt", "messrs",
    // Organizations
    "dept", "univ", "assn", "bros",
    // Latin and editorial
    "e.g", "i.e", "vs", "cf", "approx", "viz", "figs", "nos", "vol", "vols", "pp", "eds", "resp",
    // Places
    "ave", "blvd", "mt",
];

/// Common English abbreviations which are spelled like words that may end a
/// sentence
const AMBIGUOUS_ABBREVIATIONS: &[&str] = &[
    // Titles
    "gen", "col", "sen", "rep",
    // Organizations
    "inc", "ltd", "co", "corp",
    // Latin and editorial
    "etc", "al", "ca", "fig", "no", "p", "ed", "est", "ref",
    // Calendar
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mon",
    "tue", "tues", "wed", "thu", "thurs", "fri", "sat", "sun",
    // Places and units
    "rd", "ft", "u.s", "u.k", "a.m", "p.m",
];
