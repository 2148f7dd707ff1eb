//! Sentence and word splitting plus the content-word filter.
//!
//! Boundaries follow Unicode text segmentation (UAX #29) and the stopword and
//! abbreviation tables are fixed, so identical input always yields identical
//! tokens regardless of locale.

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

mod stopwords;

pub use stopwords::{ABBREVIATIONS, ENGLISH_STOPWORDS};

/// Contractions and possessives split off the word they attach to.
const CLITICS: [&str; 14] = [
    "'s", "’s", "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'d", "’d", "'m", "’m",
];

#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: &'static HashSet<&'static str>,
    abbreviations: &'static HashSet<&'static str>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            stopwords: &*stopwords::STOPWORD_SET,
            abbreviations: &*stopwords::ABBREVIATION_SET,
        }
    }

    /// Split text into trimmed sentences.
    ///
    /// Line breaks count as plain spaces; only punctuation ends a sentence.
    pub fn tokenize_sentences(&self, text: &str) -> Vec<String> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut sentences: Vec<String> = Vec::new();
        let mut carry = false;

        for piece in text.unicode_sentences() {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }

            match sentences.last_mut() {
                Some(last) if carry => {
                    last.push(' ');
                    last.push_str(piece);
                }
                _ => sentences.push(piece.to_string()),
            }

            carry = sentences
                .last()
                .map(|s| self.ends_with_abbreviation(s))
                .unwrap_or(false);
        }

        sentences
    }

    /// Split text into words, dropping whitespace and punctuation segments.
    ///
    /// Trailing clitics become their own token: "Tesla's" gives "Tesla", "'s".
    pub fn tokenize_words(&self, text: &str) -> Vec<String> {
        let mut words = Vec::new();
        for word in text.unicode_words() {
            match split_clitic(word) {
                Some((stem, clitic)) => {
                    words.push(stem.to_string());
                    words.push(clitic.to_string());
                }
                None => words.push(word.to_string()),
            }
        }
        words
    }

    /// True for alphanumeric words outside the stopword table.
    pub fn is_content_word(&self, word: &str) -> bool {
        !word.is_empty()
            && word.chars().all(char::is_alphanumeric)
            && !self.is_stopword(word)
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word.to_lowercase().as_str())
    }

    /// Lower-cased content words of `text`, in order of appearance.
    pub fn content_words(&self, text: &str) -> Vec<String> {
        self.tokenize_words(text)
            .into_iter()
            .filter(|w| self.is_content_word(w))
            .map(|w| w.to_lowercase())
            .collect()
    }

    /// First sentence of `text`, or the trimmed text when it has none.
    pub fn first_sentence(&self, text: &str) -> String {
        self.tokenize_sentences(text)
            .into_iter()
            .next()
            .unwrap_or_else(|| text.trim().to_string())
    }

    fn ends_with_abbreviation(&self, sentence: &str) -> bool {
        sentence
            .split_whitespace()
            .last()
            .map(|token| self.abbreviations.contains(token.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

fn split_clitic(word: &str) -> Option<(&str, &str)> {
    CLITICS.iter().find_map(|clitic| {
        let at = word.len().checked_sub(clitic.len())?;
        if at == 0 || !word.is_char_boundary(at) || !word[at..].eq_ignore_ascii_case(clitic) {
            return None;
        }
        Some((&word[..at], &word[at..]))
    })
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
