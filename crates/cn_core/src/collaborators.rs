use async_trait::async_trait;

use crate::types::{AudioArtifact, ComparativeReport, RawArticle};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetch recent coverage for a company.
    ///
    /// An error here is terminal for the whole run.
    async fn fetch_articles(&self, company: &str) -> Result<Vec<RawArticle>>;
}

#[async_trait]
pub trait BodyFetcher: Send + Sync {
    /// Fetch the linked page and return the leading text of its body.
    async fn fetch_body_summary(&self, link: &str) -> Result<String>;
}

#[async_trait]
pub trait AudioRenderer: Send + Sync {
    /// Speak the report and return where the audio was written.
    async fn render(&self, report: &ComparativeReport) -> Result<AudioArtifact>;
}
