//! Analysis of a single blob of text

use crate::{frequency::FrequencyMap, tokenizer::Tokenizer, Token};

/// Everything we know about a blob of text
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextAnalysis {
    /// Words, in order of appearance
    pub words: Vec<Token>,

    /// Sentences, in order of appearance
    pub sentences: Vec<Box<str>>,

    /// Number of occurences of each distinct word
    pub frequencies: FrequencyMap,
}
//
impl TextAnalysis {
    /// Number of sentences
    pub fn num_sentences(&self) -> usize {
        self.sentences.len()
    }
}

/// Tokenize some text into words and sentences, and count word occurences
pub fn analyze_text(tokenizer: &impl Tokenizer, text: &str) -> TextAnalysis {
    let words = tokenizer.words(text);
    let sentences = tokenizer.sentences(text);
    let frequencies = FrequencyMap::from_words(&words);
    log::trace!(
        "Found {} words ({} distinct) and {} sentences in {} bytes of text",
        words.len(),
        frequencies.len(),
        sentences.len(),
        text.len()
    );
    TextAnalysis {
        words,
        sentences,
        frequencies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::UnicodeTokenizer;

    #[test]
    fn consistency() {
        let tokenizer = UnicodeTokenizer::default();
        for text in [
            "",
            "Hello world. Hello again.",
            "No final period",
            "Dr. Who? Yes! It's 4.5 out of 5... maybe.",
        ] {
            let analysis = analyze_text(&tokenizer, text);
            assert_eq!(analysis.num_sentences(), analysis.sentences.len());
            assert_eq!(analysis.frequencies.total(), analysis.words.len());
            assert_eq!(analysis.words, tokenizer.words(text));
            assert_eq!(analysis.sentences, tokenizer.sentences(text));
        }
    }

    #[test]
    fn empty_text() {
        let analysis = analyze_text(&UnicodeTokenizer::default(), "");
        assert_eq!(analysis, TextAnalysis::default());
        assert_eq!(analysis.num_sentences(), 0);
    }
}
