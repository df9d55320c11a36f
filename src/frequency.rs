//! Word frequency accounting

use crate::{top, Token};
use std::{collections::HashMap, num::NonZeroUsize};

/// Number of occurences of each distinct word
///
/// Words are kept in order of first occurence, which is what breaks ties
/// between equally frequent words in [`most_common()`](Self::most_common).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrequencyMap {
    /// Distinct words and their occurence count, in order of first occurence
    entries: Vec<(Token, NonZeroUsize)>,

    /// Position of each word within `entries`
    index: HashMap<Token, usize>,
}
//
impl FrequencyMap {
    /// Set up an empty frequency map
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the words from a word sequence
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a Token>) -> Self {
        let mut result = Self::new();
        for word in words {
            result.add(word, NonZeroUsize::MIN);
        }
        result
    }

    /// Record some occurences of a word
    pub fn add(&mut self, word: &str, count: NonZeroUsize) {
        if let Some(&idx) = self.index.get(word) {
            let (_, total) = &mut self.entries[idx];
            *total = total
                .checked_add(count.get())
                .expect("word counts should not overflow usize");
            return;
        }
        let word = Token::from(word);
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, count));
    }

    /// Add the occurences of another frequency map to this one
    ///
    /// Words that are new to this map are appended in the order where they
    /// first occured in the other map.
    pub fn merge(&mut self, other: &FrequencyMap) {
        for (word, count) in other.iter() {
            self.add(word, count);
        }
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Truth that no word was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded occurences, across all words
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count.get()).sum()
    }

    /// Number of occurences of a word
    pub fn get(&self, word: &str) -> usize {
        self.index
            .get(word)
            .map_or(0, |&idx| self.entries[idx].1.get())
    }

    /// Iterate over words and their occurence count, in order of first
    /// occurence
    pub fn iter(&self) -> impl Iterator<Item = (&str, NonZeroUsize)> + '_ {
        self.entries.iter().map(|(word, count)| (&**word, *count))
    }

    /// Most frequent words, by decreasing number of occurences
    ///
    /// Equally frequent words are listed in order of first occurence.
    pub fn most_common(&self, max_len: NonZeroUsize) -> Vec<(&str, usize)> {
        top::pick_top_words(
            self.entries
                .iter()
                .map(|(word, count)| (&**word, count.get())),
            max_len,
        )
    }
}
