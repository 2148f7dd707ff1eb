use std::collections::HashMap;

use crate::tokenize::Tokenizer;

/// Returned for blank input.
pub const NO_CONTENT: &str = "No content to summarize.";

/// Single-document, frequency-based extractive summarizer.
///
/// A sentence scores the summed frequency of every content word of the text
/// that appears anywhere inside it as a substring. Matching is deliberately
/// coarse: `cat` also counts inside `category`.
#[derive(Debug, Clone, Copy)]
pub struct Summarizer<'a> {
    tokenizer: &'a Tokenizer,
}

impl<'a> Summarizer<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn summarize(&self, text: &str, target_sentences: usize) -> String {
        if text.trim().is_empty() {
            return NO_CONTENT.to_string();
        }

        let target = target_sentences.max(1);
        let sentences = self.tokenizer.tokenize_sentences(text);
        if sentences.len() <= target {
            return text.trim().to_string();
        }

        let frequencies = self.word_frequencies(text);
        let mut scored = score_sentences(&sentences, &frequencies);

        if scored.is_empty() {
            return sentences[..target].join(" ").trim().to_string();
        }

        // Stable, so equal scores keep document order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored
            .iter()
            .take(target)
            .map(|(sentence, _)| *sentence)
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    fn word_frequencies(&self, text: &str) -> HashMap<String, usize> {
        let mut frequencies = HashMap::new();
        for word in self.tokenizer.content_words(text) {
            *frequencies.entry(word).or_insert(0) += 1;
        }
        frequencies
    }
}

/// Scores keyed by sentence text in first-seen order.
///
/// Repeated sentences share one entry and their scores add up; sentences
/// without any matching word are left out.
fn score_sentences<'s>(
    sentences: &'s [String],
    frequencies: &HashMap<String, usize>,
) -> Vec<(&'s str, usize)> {
    let mut scored: Vec<(&str, usize)> = Vec::new();

    for sentence in sentences {
        let lowered = sentence.to_lowercase();
        let score: usize = frequencies
            .iter()
            .filter(|(word, _)| lowered.contains(word.as_str()))
            .map(|(_, freq)| *freq)
            .sum();
        if score == 0 {
            continue;
        }

        match scored.iter_mut().find(|(s, _)| *s == sentence.as_str()) {
            Some((_, total)) => *total += score,
            None => scored.push((sentence.as_str(), score)),
        }
    }

    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summarize(text: &str, target: usize) -> String {
        let tokenizer = Tokenizer::new();
        Summarizer::new(&tokenizer).summarize(text, target)
    }

    #[test]
    fn test_blank_text_returns_marker() {
        assert_eq!(summarize("", 2), NO_CONTENT);
        assert_eq!(summarize("  \n\t ", 2), NO_CONTENT);
    }

    #[test]
    fn test_short_text_is_identity() {
        assert_eq!(summarize("  Only one sentence here.  ", 2), "Only one sentence here.");
        assert_eq!(
            summarize("First sentence. Second sentence.", 2),
            "First sentence. Second sentence."
        );
    }

    #[test]
    fn test_wrapped_lines_are_not_sentences() {
        let wrapped = "Markets rallied on strong\nearnings from major banks today.";
        assert_eq!(summarize(wrapped, 1), wrapped);

        let text = "Tesla opened a\nnew factory. Tesla factory output\nrose. Weather was mild.";
        assert_eq!(
            summarize(text, 2),
            "Tesla opened a new factory. Tesla factory output rose."
        );
    }

    #[test]
    fn test_picks_highest_scoring_sentences() {
        let text = "Tesla unveils new factory. Profits rose sharply. Critics raised concerns about safety.";
        assert_eq!(
            summarize(text, 2),
            "Tesla unveils new factory. Critics raised concerns about safety."
        );
    }

    #[test]
    fn test_selection_follows_score_not_position() {
        let text = "Markets were quiet. Apple shares jumped. Apple sales grew and Apple shares jumped again.";
        // apple=3, shares=2, jumped=2, sales=1, grew=1, markets=1, quiet=1
        assert_eq!(
            summarize(text, 1),
            "Apple sales grew and Apple shares jumped again."
        );
    }

    #[test]
    fn test_substring_matching_is_kept() {
        // "cat" is counted inside "category" as well.
        let text = "Cat food. The category grows. Dog food.";
        let tokenizer = Tokenizer::new();
        let summarizer = Summarizer::new(&tokenizer);
        let frequencies = summarizer.word_frequencies(text);
        let sentences = tokenizer.tokenize_sentences(text);
        let scored = score_sentences(&sentences, &frequencies);
        let category = scored.iter().find(|(s, _)| s.starts_with("The category")).unwrap();
        // category + grows + cat
        assert_eq!(category.1, 3);
    }

    #[test]
    fn test_only_stopwords_still_returns_sentences() {
        let text = "It is. We are. They were.";
        assert_eq!(summarize(text, 2), "It is. We are.");
    }

    #[test]
    fn test_result_is_subset_of_sentences() {
        let text = "Oil prices fell. Airlines gained on cheaper fuel. Analysts expect oil to stay low. Shares were mixed.";
        let tokenizer = Tokenizer::new();
        let sentences = tokenizer.tokenize_sentences(text);
        let summary = Summarizer::new(&tokenizer).summarize(text, 2);
        let picked = tokenizer.tokenize_sentences(&summary);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|s| sentences.contains(s)));
    }
}
