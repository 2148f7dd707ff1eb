use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cn_core::{
    AnalyzedArticle, ArticleSource, AudioArtifact, AudioRenderer, BodyFetcher, ComparativeReport,
    PipelineConfig, RawArticle, Result,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::analyzer::ArticleAnalyzer;
use crate::resources::NlpResources;

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub query: String,
    pub articles: Vec<AnalyzedArticle>,
    pub report: Option<ComparativeReport>,
    pub audio: Option<AudioArtifact>,
    /// Failures after retrieval that did not discard the analyzed articles.
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Retrieval, analysis, aggregation and narration for one company.
pub struct Pipeline {
    resources: Arc<NlpResources>,
    source: Arc<dyn ArticleSource>,
    analyzer: ArticleAnalyzer,
    audio: Option<Arc<dyn AudioRenderer>>,
    config: PipelineConfig,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("audio", &self.audio.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl Pipeline {
    pub fn new(
        resources: Arc<NlpResources>,
        source: Arc<dyn ArticleSource>,
        fetcher: Arc<dyn BodyFetcher>,
        config: PipelineConfig,
    ) -> Self {
        let analyzer = ArticleAnalyzer::new(resources.clone(), fetcher, config.fallback_concurrency);
        Self {
            resources,
            source,
            analyzer,
            audio: None,
            config,
        }
    }

    pub fn with_audio(mut self, renderer: Arc<dyn AudioRenderer>) -> Self {
        self.audio = Some(renderer);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn resources(&self) -> &Arc<NlpResources> {
        &self.resources
    }

    pub async fn analyze_articles(&self, articles: Vec<RawArticle>) -> Result<Vec<AnalyzedArticle>> {
        self.analyzer.analyze_articles(articles).await
    }

    pub fn build_report(&self, articles: &[AnalyzedArticle]) -> Result<ComparativeReport> {
        self.resources.aggregator().build_report(articles)
    }

    /// Runs every stage for `company`.
    ///
    /// A retrieval error ends the run. Later failures are recorded as warnings
    /// and the articles analyzed so far are still returned.
    pub async fn run(&self, company: &str) -> Result<PipelineOutput> {
        info!("📰 Fetching news for {} from {}", company, self.source.name());
        let raw = self.source.fetch_articles(company).await?;
        info!("📰 Retrieved {} articles", raw.len());

        let articles = self.analyze_articles(raw).await?;
        let degraded = articles
            .iter()
            .filter(|a| a.summary.is_degraded() || a.sentiment.is_degraded())
            .count();
        info!("🧠 Analyzed {} articles ({} degraded)", articles.len(), degraded);

        let mut warnings = Vec::new();
        let report = match self.build_report(&articles) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("Report generation failed: {}", e);
                warnings.push(e.to_string());
                None
            }
        };

        let audio = match (&report, &self.audio) {
            (Some(report), Some(renderer)) if self.config.audio_enabled => {
                info!("🔊 Rendering audio summary ({})", self.config.audio_language);
                match renderer.render(report).await {
                    Ok(artifact) => Some(artifact),
                    Err(e) => {
                        warn!("Audio rendering failed: {}", e);
                        warnings.push(e.to_string());
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(PipelineOutput {
            query: company.to_string(),
            articles,
            report,
            audio,
            warnings,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::testing::TableScorer;
    use async_trait::async_trait;
    use cn_core::{Error, Outcome, Sentiment};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        articles: Option<Vec<RawArticle>>,
    }

    #[async_trait]
    impl ArticleSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch_articles(&self, _company: &str) -> Result<Vec<RawArticle>> {
            self.articles
                .clone()
                .ok_or_else(|| Error::Retrieval("Failed to fetch news (Status: 503)".to_string()))
        }
    }

    struct MockFetcher;

    #[async_trait]
    impl BodyFetcher for MockFetcher {
        async fn fetch_body_summary(&self, _link: &str) -> Result<String> {
            Err(Error::Retrieval("offline".to_string()))
        }
    }

    #[derive(Default)]
    struct MockAudio {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AudioRenderer for MockAudio {
        async fn render(&self, report: &ComparativeReport) -> Result<AudioArtifact> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Audio("quota exceeded".to_string()));
            }
            Ok(AudioArtifact {
                path: PathBuf::from(format!("/tmp/{}.mp3", report.company)),
                language: "hi".to_string(),
                bytes: 42,
            })
        }
    }

    fn pipeline(articles: Option<Vec<RawArticle>>) -> Pipeline {
        let scorer = TableScorer::default()
            .with("Record deliveries lifted shares.", 0.7)
            .with("Regulators opened a probe.", -0.6);
        let resources = Arc::new(NlpResources::with_scorer(Arc::new(scorer)).unwrap());
        Pipeline::new(
            resources,
            Arc::new(MockSource { articles }),
            Arc::new(MockFetcher),
            PipelineConfig::default(),
        )
    }

    fn sample() -> Vec<RawArticle> {
        vec![
            RawArticle::new("Tesla deliveries jump - Reuters", "https://n/1")
                .with_description("Reuters - Record deliveries lifted shares. More."),
            RawArticle::new("Tesla faces probe - CNBC", "https://n/2")
                .with_description("Regulators opened a probe."),
            RawArticle::new("Tesla to report Tuesday", "https://n/3")
                .with_description("Tesla to report Tuesday"),
        ]
    }

    #[tokio::test]
    async fn test_full_run() {
        let audio = Arc::new(MockAudio::default());
        let pipeline = pipeline(Some(sample())).with_audio(audio.clone());

        let output = pipeline.run("Tesla").await.unwrap();

        assert_eq!(output.query, "Tesla");
        assert_eq!(output.articles.len(), 3);
        assert_eq!(output.articles[0].sentiment, Outcome::Value(Sentiment::Positive));
        assert_eq!(output.articles[1].sentiment, Outcome::Value(Sentiment::Negative));
        assert_eq!(
            output.articles[2].summary,
            Outcome::Degraded("Error fetching summary: offline".to_string())
        );

        let report = output.report.unwrap();
        assert_eq!(report.company, "Tesla");
        assert_eq!(report.sentiment_distribution.total(), 3);
        assert_eq!(report.insights.len(), 3);
        assert_eq!(audio.calls.load(Ordering::SeqCst), 1);
        assert!(output.audio.is_some());
        assert!(output.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_retrieval_error_is_terminal() {
        let err = pipeline(None).run("Tesla").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch news (Status: 503)");
    }

    #[tokio::test]
    async fn test_no_articles_keeps_run_but_skips_report_and_audio() {
        let audio = Arc::new(MockAudio::default());
        let output = pipeline(Some(vec![])).with_audio(audio.clone()).run("Nobody").await.unwrap();
        assert!(output.articles.is_empty());
        assert!(output.report.is_none());
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(audio.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_audio_failure_is_a_warning() {
        let audio = Arc::new(MockAudio { fail: true, ..Default::default() });
        let output = pipeline(Some(sample())).with_audio(audio).run("Tesla").await.unwrap();
        assert!(output.report.is_some());
        assert!(output.audio.is_none());
        assert_eq!(output.warnings, vec!["TTS error: quota exceeded"]);
    }

    #[tokio::test]
    async fn test_audio_disabled_by_config() {
        let audio = Arc::new(MockAudio::default());
        let mut pipeline = pipeline(Some(sample())).with_audio(audio.clone());
        pipeline.config.audio_enabled = false;
        let output = pipeline.run("Tesla").await.unwrap();
        assert!(output.audio.is_none());
        assert_eq!(audio.calls.load(Ordering::SeqCst), 0);
    }
}
