use std::panic::{self, AssertUnwindSafe};

use cn_core::{Error, Result};
use vader_sentiment::SentimentIntensityAnalyzer;

use super::PolarityScorer;

/// VADER lexicon and rule-based valence scorer.
///
/// The lexicon is loaded by the first call; `NlpResources::init` makes that
/// call at startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderScorer;

impl VaderScorer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for VaderScorer {
    fn name(&self) -> &str {
        "vader"
    }

    /// Compound score with `!`/`?` emphasis applied only to a non-zero sum.
    ///
    /// `vader_sentiment` subtracts the emphasis when the valence sum is zero,
    /// which turns neutral text ending in `!` negative.
    fn compound(&self, text: &str) -> Result<f64> {
        let compound = raw_compound(text)?;
        if compound == 0.0 || !text.contains(|c: char| c == '!' || c == '?') {
            return Ok(compound);
        }

        let plain: String = text.chars().filter(|c| !matches!(c, '!' | '?')).collect();
        if raw_compound(&plain)? == 0.0 {
            return Ok(0.0);
        }
        Ok(compound)
    }
}

fn raw_compound(text: &str) -> Result<f64> {
    let scored = panic::catch_unwind(AssertUnwindSafe(|| {
        let analyzer = SentimentIntensityAnalyzer::new();
        analyzer.polarity_scores(text).get("compound").copied()
    }));

    match scored {
        Ok(Some(compound)) => Ok(compound),
        Ok(None) => Err(Error::Sentiment("scorer returned no compound score".to_string())),
        Err(payload) => Err(Error::Sentiment(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "scorer panicked".to_string()
    }
}
