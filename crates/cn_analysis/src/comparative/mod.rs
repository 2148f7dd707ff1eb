use std::collections::HashMap;

use cn_core::{AnalyzedArticle, ComparativeReport, Error, Result, Sentiment, SentimentDistribution};

use crate::tokenize::Tokenizer;

pub const MAX_TOPICS: usize = 5;

/// What the insight rules get to look at.
pub struct InsightContext<'a> {
    pub articles: &'a [AnalyzedArticle],
    pub distribution: &'a SentimentDistribution,
}

impl<'a> InsightContext<'a> {
    fn first_title(&self, sentiment: Sentiment) -> Option<&'a str> {
        self.articles
            .iter()
            .find(|a| a.sentiment.is(sentiment))
            .map(|a| a.title.as_str())
    }
}

/// An insight emitted when `applies` holds.
pub struct InsightRule {
    pub applies: fn(&InsightContext<'_>) -> bool,
    pub message: fn(&InsightContext<'_>) -> String,
}

/// Evaluated in this order; a rule whose predicate fails contributes nothing.
pub const INSIGHT_RULES: [InsightRule; 3] = [
    InsightRule {
        applies: |ctx| ctx.first_title(Sentiment::Positive).is_some(),
        message: |ctx| {
            format!(
                "Positive coverage (e.g., '{}') focuses on achievements or growth.",
                ctx.first_title(Sentiment::Positive).unwrap_or_default()
            )
        },
    },
    InsightRule {
        applies: |ctx| ctx.first_title(Sentiment::Negative).is_some(),
        message: |ctx| {
            format!(
                "Negative coverage (e.g., '{}') highlights challenges or controversies.",
                ctx.first_title(Sentiment::Negative).unwrap_or_default()
            )
        },
    },
    InsightRule {
        applies: |ctx| ctx.distribution.get(Sentiment::Neutral.as_str()) > 0,
        message: |ctx| {
            format!(
                "Neutral articles ({}) provide factual updates.",
                ctx.distribution.get(Sentiment::Neutral.as_str())
            )
        },
    },
];

/// Builds the cross-article report for one batch.
#[derive(Debug, Clone, Copy)]
pub struct ComparativeAggregator<'a> {
    tokenizer: &'a Tokenizer,
}

impl<'a> ComparativeAggregator<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Self { tokenizer }
    }

    pub fn build_report(&self, articles: &[AnalyzedArticle]) -> Result<ComparativeReport> {
        let first = articles.first().ok_or(Error::EmptyInput)?;

        let sentiment_distribution = sentiment_distribution(articles);
        let common_topics = self.common_topics(articles);
        let insights = insights(&InsightContext {
            articles,
            distribution: &sentiment_distribution,
        });

        Ok(ComparativeReport {
            company: company_label(&first.title),
            sentiment_distribution,
            common_topics,
            insights,
        })
    }

    /// Most frequent content words across all summaries, ties by first occurrence.
    pub fn common_topics(&self, articles: &[AnalyzedArticle]) -> Vec<String> {
        let combined = articles
            .iter()
            .map(|a| a.summary.text())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for word in self.tokenizer.content_words(&combined) {
            match index.get(&word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.into_iter().take(MAX_TOPICS).map(|(word, _)| word).collect()
    }
}

/// Counts keyed by label; degraded reasons stay distinct keys.
pub fn sentiment_distribution(articles: &[AnalyzedArticle]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::new();
    for article in articles {
        distribution.increment(article.sentiment.label());
    }
    distribution
}

pub fn insights(ctx: &InsightContext<'_>) -> Vec<String> {
    INSIGHT_RULES
        .iter()
        .filter(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.message)(ctx))
        .collect()
}

/// First whitespace token of the first `" - "` segment of a title.
///
/// A naming heuristic, not an entity extractor: "Apple Inc. - Reuters" gives
/// "Apple" and a title starting with a space gives an empty label.
pub fn company_label(title: &str) -> String {
    title
        .split(" - ")
        .next()
        .and_then(|segment| segment.split(' ').next())
        .unwrap_or_default()
        .to_string()
}
