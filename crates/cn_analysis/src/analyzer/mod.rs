use std::fmt;
use std::sync::Arc;

use cn_core::{AnalyzedArticle, BodyFetcher, Outcome, RawArticle, Result, NO_SUMMARY};
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::resources::NlpResources;

/// Source attributions that prefix feed descriptions, tried in order.
pub const SOURCE_SEPARATORS: [&str; 2] = [" - ", " | "];

/// Attaches a summary and a sentiment label to each raw article.
pub struct ArticleAnalyzer {
    resources: Arc<NlpResources>,
    fetcher: Arc<dyn BodyFetcher>,
    semaphore: Arc<Semaphore>,
}

impl fmt::Debug for ArticleAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleAnalyzer")
            .field("fetcher", &"<dyn BodyFetcher>")
            .field("permits", &self.semaphore.available_permits())
            .finish()
    }
}

impl ArticleAnalyzer {
    pub fn new(resources: Arc<NlpResources>, fetcher: Arc<dyn BodyFetcher>, concurrency: usize) -> Self {
        Self {
            resources,
            fetcher,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Analyze every article concurrently; output order matches input order.
    pub async fn analyze_articles(&self, articles: Vec<RawArticle>) -> Result<Vec<AnalyzedArticle>> {
        let futures: Vec<_> = articles
            .into_iter()
            .map(|article| self.analyze_article(article))
            .collect();

        join_all(futures).await.into_iter().collect()
    }

    pub async fn analyze_article(&self, article: RawArticle) -> Result<AnalyzedArticle> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| cn_core::Error::External(e.into()))?;

        let summary = self.summary_for(&article).await;
        let sentiment = self.resources.classifier().classify(summary.text());
        debug!("🧠 {} -> {}", article.title, sentiment.label());

        Ok(AnalyzedArticle::from_raw(article, summary, sentiment))
    }

    async fn summary_for(&self, article: &RawArticle) -> Outcome<String> {
        let tokenizer = self.resources.tokenizer();

        if needs_body_fetch(article) {
            debug!("Description unusable for '{}', fetching {}", article.title, article.link);
            return match self.fetcher.fetch_body_summary(&article.link).await {
                Ok(body) => Outcome::Value(non_empty(tokenizer.first_sentence(&body))),
                Err(e) => {
                    warn!("Body fetch failed for {}: {}", article.link, e);
                    Outcome::Degraded(format!("Error fetching summary: {}", e))
                }
            };
        }

        let description = strip_source_prefix(&article.description_text);
        Outcome::Value(non_empty(tokenizer.first_sentence(&description)))
    }
}

/// The feed description is useless when blank or a copy of the title.
pub fn needs_body_fetch(article: &RawArticle) -> bool {
    let description = article.description_text.trim();
    description.is_empty() || description == article.title.trim()
}

/// Drop everything up to the first source separator, once per separator.
pub fn strip_source_prefix(description: &str) -> String {
    let mut cleaned = description.to_string();
    for separator in SOURCE_SEPARATORS {
        if let Some((_, rest)) = cleaned.split_once(separator) {
            cleaned = rest.trim().to_string();
        }
    }
    cleaned
}

fn non_empty(summary: String) -> String {
    if summary.trim().is_empty() {
        NO_SUMMARY.to_string()
    } else {
        summary
    }
}
