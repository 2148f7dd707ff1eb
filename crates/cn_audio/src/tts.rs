use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cn_core::{AudioArtifact, AudioRenderer, ComparativeReport, Error, PipelineConfig, Result};
use reqwest::Client;
use url::Url;

use crate::narration::{hindi_narration, split_chunks, MAX_CHUNK_CHARS};

pub const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Speaks a report through the Google Translate speech endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTtsRenderer {
    client: Client,
    endpoint: String,
    language: String,
    output_dir: Option<PathBuf>,
}

impl GoogleTtsRenderer {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| Error::Audio(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: TTS_ENDPOINT.to_string(),
            language: config.audio_language.clone(),
            output_dir: None,
        })
    }

    /// Write audio files under `dir` instead of the system temp directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn chunk_url(&self, chunk: &str, index: usize, total: usize) -> Result<Url> {
        let index = index.to_string();
        let total = total.to_string();
        let length = chunk.chars().count().to_string();
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.language.as_str()),
                ("client", "tw-ob"),
                ("idx", index.as_str()),
                ("total", total.as_str()),
                ("textlen", length.as_str()),
            ],
        )
        .map_err(|e| Error::Audio(e.to_string()))
    }

    async fn fetch_chunk(&self, url: Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Audio(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Audio(format!("speech endpoint returned {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Audio(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioRenderer for GoogleTtsRenderer {
    async fn render(&self, report: &ComparativeReport) -> Result<AudioArtifact> {
        let text = hindi_narration(report);
        let chunks = split_chunks(&text, MAX_CHUNK_CHARS);
        tracing::debug!("🔊 Speaking {} chunks for {}", chunks.len(), report.company);

        let mut audio = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let url = self.chunk_url(chunk, i, chunks.len())?;
            audio.extend(self.fetch_chunk(url).await?);
        }

        if audio.is_empty() {
            return Err(Error::Audio("no audio returned".to_string()));
        }

        let path = write_mp3(&audio, self.output_dir.as_deref())?;
        tracing::info!("🔊 Audio summary written to {}", path.display());

        Ok(AudioArtifact {
            path,
            language: self.language.clone(),
            bytes: audio.len(),
        })
    }
}

/// Persist `bytes` to a fresh `.mp3` file that outlives this process.
pub fn write_mp3(bytes: &[u8], dir: Option<&Path>) -> Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("company-news-").suffix(".mp3");

    let mut file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
    .map_err(|e| Error::Audio(e.to_string()))?;

    file.write_all(bytes)
        .and_then(|_| file.flush())
        .map_err(|e| Error::Audio(e.to_string()))?;

    file.into_temp_path()
        .keep()
        .map_err(|e| Error::Audio(e.to_string()))
}
