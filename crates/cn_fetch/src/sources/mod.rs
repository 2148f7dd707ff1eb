pub mod google_news;

pub use google_news::GoogleNewsSource;

/// Common utilities for sources
pub(crate) mod utils {
    use cn_core::{Error, Result};
    use scraper::{ElementRef, Html, Selector};
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    pub fn selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Retrieval(format!("Invalid selector {}: {}", selector, e)))
    }

    /// Trimmed text of the first `selector` match below `element`.
    pub fn child_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
        element
            .select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = self::selector(selector)?;
        Ok(document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect())
    }

    /// Text content of an HTML fragment, trimmed.
    pub fn strip_html(fragment: &str) -> String {
        Html::parse_fragment(fragment)
            .root_element()
            .text()
            .collect::<String>()
            .trim()
            .to_string()
    }
}
