//! Text analytics for company news coverage: tokenization, extractive
//! summaries, sentiment labels and the comparative report.

pub mod analyzer;
pub mod comparative;
pub mod pipeline;
pub mod resources;
pub mod sentiment;
pub mod summarize;
pub mod tokenize;

pub use analyzer::ArticleAnalyzer;
pub use comparative::ComparativeAggregator;
pub use pipeline::{Pipeline, PipelineOutput};
pub use resources::NlpResources;
pub use sentiment::{PolarityScorer, SentimentClassifier, VaderScorer};
pub use summarize::Summarizer;
pub use tokenize::Tokenizer;

pub mod prelude {
    pub use super::{NlpResources, Pipeline, PipelineOutput};
    pub use cn_core::{AnalyzedArticle, ComparativeReport, Error, Outcome, RawArticle, Result, Sentiment};
}
