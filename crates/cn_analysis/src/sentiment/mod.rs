use std::fmt;
use std::sync::Arc;

use cn_core::{Error, Outcome, Result, Sentiment};

pub mod vader;

pub use vader::VaderScorer;

/// Produces a compound polarity score in `[-1, 1]` for a piece of text.
pub trait PolarityScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn compound(&self, text: &str) -> Result<f64>;
}

/// Maps text onto a sentiment label, degrading instead of failing.
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    pub fn classify(&self, text: &str) -> Outcome<Sentiment> {
        match self.scorer.compound(text) {
            Ok(score) if score.is_finite() => Outcome::Value(Sentiment::from_compound(score)),
            Ok(score) => Outcome::Degraded(format!("Sentiment error: non-finite score {}", score)),
            Err(e @ Error::Sentiment(_)) => Outcome::Degraded(e.to_string()),
            Err(e) => Outcome::Degraded(format!("Sentiment error: {}", e)),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Scores text by looking it up in a fixed table; unknown text is neutral.
    #[derive(Debug, Default)]
    pub struct TableScorer {
        scores: HashMap<String, f64>,
    }

    impl TableScorer {
        pub fn with(mut self, text: &str, score: f64) -> Self {
            self.scores.insert(text.to_string(), score);
            self
        }
    }

    impl PolarityScorer for TableScorer {
        fn name(&self) -> &str {
            "table"
        }

        fn compound(&self, text: &str) -> Result<f64> {
            Ok(self.scores.get(text).copied().unwrap_or(0.0))
        }
    }

    #[derive(Debug)]
    pub struct FailingScorer;

    impl PolarityScorer for FailingScorer {
        fn name(&self) -> &str {
            "failing"
        }

        fn compound(&self, _text: &str) -> Result<f64> {
            Err(Error::Sentiment("lexicon unavailable".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FailingScorer, TableScorer};
    use super::*;

    #[test]
    fn test_thresholds() {
        let scorer = TableScorer::default()
            .with("up", 0.05)
            .with("flat", 0.049)
            .with("down", -0.05);
        let classifier = SentimentClassifier::new(Arc::new(scorer));
        assert_eq!(classifier.classify("up"), Outcome::Value(Sentiment::Positive));
        assert_eq!(classifier.classify("flat"), Outcome::Value(Sentiment::Neutral));
        assert_eq!(classifier.classify("down"), Outcome::Value(Sentiment::Negative));
        assert_eq!(classifier.classify(""), Outcome::Value(Sentiment::Neutral));
    }

    #[test]
    fn test_scorer_failure_degrades() {
        let classifier = SentimentClassifier::new(Arc::new(FailingScorer));
        assert_eq!(
            classifier.classify("anything"),
            Outcome::Degraded("Sentiment error: lexicon unavailable".to_string())
        );
    }

    #[test]
    fn test_non_finite_score_degrades() {
        let classifier = SentimentClassifier::new(Arc::new(TableScorer::default().with("x", f64::NAN)));
        assert!(classifier.classify("x").is_degraded());
    }
}
