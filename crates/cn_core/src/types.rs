use std::fmt;
use std::path::PathBuf;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Display value used when a feed item carries no publication date.
pub const NOT_AVAILABLE: &str = "N/A";

/// Summary used when neither the feed nor the article page yields any text.
pub const NO_SUMMARY: &str = "No summary available";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// A news item as handed over by retrieval, before any analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub link: String,
    #[serde(default = "not_available")]
    pub published_at: String,
    #[serde(default)]
    pub description_text: String,
}

impl RawArticle {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            published_at: not_available(),
            description_text: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description_text = description.into();
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = published_at.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// Maps a compound polarity score onto a label.
    ///
    /// Scores at or above `0.05` are positive, at or below `-0.05` negative.
    pub fn from_compound(score: f64) -> Self {
        if score >= 0.05 {
            Sentiment::Positive
        } else if score <= -0.05 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a computed value or the reason an inner step could not produce one.
///
/// A degraded entry is still a valid member of a batch: it is carried through
/// aggregation instead of aborting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<T> {
    Value(T),
    Degraded(String),
}

impl<T> Outcome<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Value(v) => Some(v),
            Outcome::Degraded(_) => None,
        }
    }
}

impl Outcome<String> {
    /// The text a reader sees: the value, or the degraded reason verbatim.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Value(text) | Outcome::Degraded(text) => text,
        }
    }
}

impl Outcome<Sentiment> {
    /// Label used as a distribution key.
    pub fn label(&self) -> &str {
        match self {
            Outcome::Value(sentiment) => sentiment.as_str(),
            Outcome::Degraded(reason) => reason,
        }
    }

    pub fn is(&self, sentiment: Sentiment) -> bool {
        matches!(self, Outcome::Value(s) if *s == sentiment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    pub title: String,
    pub link: String,
    pub published_at: String,
    pub summary: Outcome<String>,
    pub sentiment: Outcome<Sentiment>,
}

impl AnalyzedArticle {
    pub fn from_raw(raw: RawArticle, summary: Outcome<String>, sentiment: Outcome<Sentiment>) -> Self {
        Self {
            title: raw.title,
            link: raw.link,
            published_at: raw.published_at,
            summary,
            sentiment,
        }
    }
}

/// Label counts in the order each label was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentDistribution {
    entries: Vec<(String, usize)>,
}

impl SentimentDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((label.to_string(), 1)),
        }
    }

    /// Count for `label`, zero when it never occurred.
    pub fn get(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

impl Serialize for SentimentDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Aggregate view over one batch of analyzed articles.
///
/// The serialized field names are consumed by the narration template and
/// must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparativeReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(rename = "Common Topics")]
    pub common_topics: Vec<String>,
    #[serde(rename = "Comparative Insights")]
    pub insights: Vec<String>,
}

/// A rendered audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub language: String,
    pub bytes: usize,
}
