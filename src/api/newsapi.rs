//! # NewsAPI Client
//!
//! Client for the NewsAPI.org "everything" search endpoint. Returns raw
//! article records for a topic, or the provider's reported error.

use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::data::RawArticle;

/// NewsAPI base URL
const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

/// HTTP timeout for provider requests
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Highest result page picked at random, to vary results for popular
/// queries
const MAX_RANDOM_PAGE: u32 = 5;

/// Errors that can occur when talking to the news provider
#[derive(Error, Debug)]
pub enum NewsApiError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The provider answered without a usable article list (bad key,
    /// quota, malformed query)
    #[error("provider error: {message} (code: {code})")]
    Api {
        /// Provider-reported error code
        code: String,
        /// Provider-reported message
        message: String,
    },

    /// A sort order string outside the provider vocabulary
    #[error("unknown sort order `{0}`, expected publishedAt, relevancy or popularity")]
    UnknownSortOrder(String),
}

/// Result ordering supported by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    /// Newest first
    PublishedAt,
    /// Most relevant to the query first
    Relevancy,
    /// From the most popular sources first
    Popularity,
}

impl SortOrder {
    /// Convert to the provider's query-parameter value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PublishedAt => "publishedAt",
            SortOrder::Relevancy => "relevancy",
            SortOrder::Popularity => "popularity",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::PublishedAt
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = NewsApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publishedAt" => Ok(SortOrder::PublishedAt),
            "relevancy" => Ok(SortOrder::Relevancy),
            "popularity" => Ok(SortOrder::Popularity),
            other => Err(NewsApiError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Search endpoint response envelope
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[allow(dead_code)]
    status: String,
    #[serde(rename = "totalResults")]
    #[allow(dead_code)]
    total_results: Option<u64>,
    articles: Option<Vec<RawArticle>>,
    code: Option<String>,
    message: Option<String>,
}

/// NewsAPI client
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NewsApiClient {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: NEWSAPI_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the base URL (used against a local stand-in server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch English-language articles for a search topic.
    ///
    /// Picks a random result page between 1 and [`MAX_RANDOM_PAGE`] so
    /// repeated searches for popular topics do not always surface the
    /// same articles. A response without an articles list is a hard
    /// [`NewsApiError::Api`] failure, surfaced to the caller as-is.
    pub async fn fetch_articles(
        &self,
        topic: &str,
        page_size: usize,
        sort: SortOrder,
    ) -> Result<Vec<RawArticle>, NewsApiError> {
        let page = rand::thread_rng().gen_range(1..=MAX_RANDOM_PAGE);
        let url = format!("{}/everything", self.base_url);
        let page_size = page_size.to_string();
        let page_param = page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", topic),
                ("pageSize", page_size.as_str()),
                ("page", page_param.as_str()),
                ("sortBy", sort.as_str()),
                ("language", "en"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: EverythingResponse = response.json().await?;
        let articles = parse_articles(body)?;
        info!(page, count = articles.len(), "fetched article page");
        Ok(articles)
    }
}

/// Extract the article list, mapping a missing list to the provider's
/// reported error
fn parse_articles(body: EverythingResponse) -> Result<Vec<RawArticle>, NewsApiError> {
    match body.articles {
        Some(articles) => Ok(articles),
        None => Err(NewsApiError::Api {
            code: body.code.unwrap_or_else(|| "unknown".to_string()),
            message: body
                .message
                .unwrap_or_else(|| "provider response had no articles field".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_round_trip() {
        for s in ["publishedAt", "relevancy", "popularity"] {
            assert_eq!(SortOrder::from_str(s).unwrap().as_str(), s);
        }
        assert!(matches!(
            SortOrder::from_str("newest"),
            Err(NewsApiError::UnknownSortOrder(_))
        ));
    }

    #[test]
    fn test_parses_success_response() {
        let json = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "source": {"id": null, "name": "Wired"},
                "title": "Robots everywhere",
                "description": "A look at automation",
                "publishedAt": "2025-02-02T08:00:00Z"
            }]
        }"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        let articles = parse_articles(body).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Robots everywhere"));
    }

    #[test]
    fn test_missing_articles_field_is_provider_error() {
        let json = r#"{
            "status": "error",
            "code": "apiKeyInvalid",
            "message": "Your API key is invalid."
        }"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        match parse_articles(body) {
            Err(NewsApiError::Api { code, message }) => {
                assert_eq!(code, "apiKeyInvalid");
                assert!(message.contains("invalid"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_article_list_is_not_an_error() {
        let json = r#"{"status": "ok", "totalResults": 0, "articles": []}"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        assert!(parse_articles(body).unwrap().is_empty());
    }
}
