use std::sync::Arc;

use cn_core::{Error, Result};
use tracing::debug;

use crate::comparative::ComparativeAggregator;
use crate::sentiment::{PolarityScorer, SentimentClassifier, VaderScorer};
use crate::summarize::Summarizer;
use crate::tokenize::Tokenizer;

/// Immutable NLP state shared by every stage of a run.
///
/// Built once at startup and handed around behind an `Arc`; dropping the last
/// handle releases it.
#[derive(Debug)]
pub struct NlpResources {
    tokenizer: Tokenizer,
    classifier: SentimentClassifier,
}

impl NlpResources {
    /// Load the tokenizer tables and the VADER scorer.
    pub fn init() -> Result<Self> {
        Self::with_scorer(Arc::new(VaderScorer::new()))
    }

    pub fn with_scorer(scorer: Arc<dyn PolarityScorer>) -> Result<Self> {
        let tokenizer = Tokenizer::new();
        if !tokenizer.is_stopword("the") {
            return Err(Error::ResourceInit("stopword table is empty".to_string()));
        }

        // Warm-up call: a scorer that cannot load its lexicon fails here, not per article.
        scorer
            .compound("")
            .map_err(|e| Error::ResourceInit(format!("{} scorer: {}", scorer.name(), e)))?;

        debug!("NLP resources ready (scorer: {})", scorer.name());
        Ok(Self {
            tokenizer,
            classifier: SentimentClassifier::new(scorer),
        })
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn summarizer(&self) -> Summarizer<'_> {
        Summarizer::new(&self.tokenizer)
    }

    pub fn aggregator(&self) -> ComparativeAggregator<'_> {
        ComparativeAggregator::new(&self.tokenizer)
    }
}

impl Drop for NlpResources {
    fn drop(&mut self) {
        debug!("NLP resources released (scorer: {})", self.classifier.scorer_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::testing::{FailingScorer, TableScorer};

    #[test]
    fn test_failing_scorer_is_fatal_at_init() {
        let err = NlpResources::with_scorer(Arc::new(FailingScorer)).unwrap_err();
        assert!(matches!(err, Error::ResourceInit(_)));
        assert!(err.to_string().contains("failing scorer"));
    }

    #[test]
    fn test_init_with_custom_scorer() {
        let resources = NlpResources::with_scorer(Arc::new(TableScorer::default())).unwrap();
        assert_eq!(resources.classifier().scorer_name(), "table");
        assert!(resources.tokenizer().is_content_word("factory"));
    }

    #[test]
    fn test_default_init() {
        let resources = NlpResources::init().unwrap();
        assert_eq!(resources.classifier().scorer_name(), "vader");
    }
}
