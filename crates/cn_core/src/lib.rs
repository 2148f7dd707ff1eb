pub mod collaborators;
pub mod config;
pub mod error;
pub mod types;

pub use collaborators::{ArticleSource, AudioRenderer, BodyFetcher};
pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use types::{
    AnalyzedArticle, AudioArtifact, ComparativeReport, Outcome, RawArticle, Sentiment,
    SentimentDistribution, NOT_AVAILABLE, NO_SUMMARY,
};
