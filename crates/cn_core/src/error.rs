use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Retrieval(String),

    #[error("Comparative analysis error: no analyzed articles")]
    EmptyInput,

    #[error("Sentiment error: {0}")]
    Sentiment(String),

    #[error("TTS error: {0}")]
    Audio(String),

    #[error("Failed to initialize NLP resources: {0}")]
    ResourceInit(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_their_prefixes() {
        assert_eq!(
            Error::Sentiment("lexicon missing".to_string()).to_string(),
            "Sentiment error: lexicon missing"
        );
        assert_eq!(
            Error::Retrieval("Network error: timed out".to_string()).to_string(),
            "Network error: timed out"
        );
        assert!(Error::EmptyInput.to_string().starts_with("Comparative analysis error"));
    }

    #[test]
    fn test_url_parse_error_maps_to_invalid_url() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
