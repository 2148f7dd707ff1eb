use async_trait::async_trait;
use cn_core::{ArticleSource, BodyFetcher, Error, PipelineConfig, RawArticle, Result, NO_SUMMARY};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html};
use url::Url;

use super::utils;
use crate::logging::Logger;

/// Google News RSS search plus article-page body extraction.
#[derive(Debug, Clone)]
pub struct GoogleNewsSource {
    client: Client,
    feed_url: String,
    max_articles: usize,
    body_paragraphs: usize,
    logger: Logger,
}

impl GoogleNewsSource {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        utils::parse_url(&config.feed_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            feed_url: config.feed_url.clone(),
            max_articles: config.max_articles,
            body_paragraphs: config.body_paragraphs,
            logger: Logger::new().with_prefix("🗞️ [google-news]".to_string()),
        })
    }

    pub fn feed_url(&self, company: &str) -> Result<Url> {
        Ok(Url::parse_with_params(&self.feed_url, &[("q", company)])?)
    }

    async fn get_text(&self, url: &str) -> Result<(StatusCode, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl ArticleSource for GoogleNewsSource {
    fn name(&self) -> &str {
        "Google News"
    }

    async fn fetch_articles(&self, company: &str) -> Result<Vec<RawArticle>> {
        let url = self.feed_url(company)?;
        self.logger.info(&format!("Fetching feed {}", url));

        let (status, body) = self
            .get_text(url.as_str())
            .await
            .map_err(|e| Error::Retrieval(format!("Network error: {}", e)))?;

        if status != StatusCode::OK {
            self.logger.warn(&format!("Feed returned {}", status));
            return Err(Error::Retrieval(format!(
                "Failed to fetch news (Status: {})",
                status.as_u16()
            )));
        }

        let articles = parse_feed(&body, self.max_articles)?;
        self.logger.info(&format!("Parsed {} items", articles.len()));
        Ok(articles)
    }
}

#[async_trait]
impl BodyFetcher for GoogleNewsSource {
    async fn fetch_body_summary(&self, link: &str) -> Result<String> {
        self.logger.debug(&format!("Fetching body of {}", link));
        let (status, body) = self.get_text(link).await?;

        if status != StatusCode::OK {
            self.logger.warn(&format!("{} returned {}", link, status));
            return Ok(NO_SUMMARY.to_string());
        }

        let text = extract_paragraphs(&body, self.body_paragraphs)?;
        if text.trim().is_empty() {
            return Ok(NO_SUMMARY.to_string());
        }
        Ok(text)
    }
}

/// Read up to `limit` `<item>` entries from an RSS document.
///
/// The feed goes through the HTML parser, which treats `<link>` as a void
/// element: the URL ends up in the text node right after it.
pub fn parse_feed(xml: &str, limit: usize) -> Result<Vec<RawArticle>> {
    let document = Html::parse_document(xml);
    let item_selector = utils::selector("item")?;
    let title_selector = utils::selector("title")?;
    let link_selector = utils::selector("link")?;
    let date_selector = utils::selector("pubdate")?;
    let description_selector = utils::selector("description")?;

    let articles = document
        .select(&item_selector)
        .take(limit)
        .map(|item| {
            let title = utils::child_text(&item, &title_selector).unwrap_or_default();
            let link = item_link(&item, &link_selector).unwrap_or_default();
            let mut article = RawArticle::new(title, link);

            if let Some(date) = utils::child_text(&item, &date_selector) {
                article = article.with_published_at(date);
            }
            if let Some(description) = utils::child_text(&item, &description_selector) {
                article = article.with_description(utils::strip_html(&description));
            }
            article
        })
        .collect();

    Ok(articles)
}

fn item_link(item: &ElementRef<'_>, selector: &scraper::Selector) -> Option<String> {
    let link = item.select(selector).next()?;

    let inner = link.text().collect::<String>();
    if !inner.trim().is_empty() {
        return Some(inner.trim().to_string());
    }

    link.next_sibling()
        .and_then(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .filter(|text| !text.is_empty())
}

/// First `count` paragraph texts of a page, each trimmed, joined by a space.
pub fn extract_paragraphs(html: &str, count: usize) -> Result<String> {
    let document = Html::parse_document(html);
    let paragraphs = utils::extract_texts(&document, "p")?;
    Ok(paragraphs
        .iter()
        .take(count)
        .map(|p| p.trim())
        .collect::<Vec<_>>()
        .join(" "))
}
