use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FEED_URL: &str = "https://news.google.com/rss/search";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Knobs shared by the retrieval, analysis and audio stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Search feed endpoint; the company name is sent as the `q` parameter.
    pub feed_url: String,
    pub max_articles: usize,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Paragraphs read from an article page when its feed description is unusable.
    pub body_paragraphs: usize,
    /// Upper bound on articles analyzed at once.
    pub fallback_concurrency: usize,
    pub summary_sentences: usize,
    pub audio_language: String,
    pub audio_enabled: bool,
}

impl PipelineConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn with_audio(mut self, enabled: bool) -> Self {
        self.audio_enabled = enabled;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            max_articles: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 5,
            body_paragraphs: 3,
            fallback_concurrency: 10,
            summary_sentences: 2,
            audio_language: "hi".to_string(),
            audio_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"max_articles": 3}"#).unwrap();
        assert_eq!(config.max_articles, 3);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.audio_language, "hi");
    }
}
