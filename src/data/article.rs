//! # Article Records
//!
//! Raw article structures as returned by the news provider, and the
//! normalized record shape the analysis pipeline consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::preprocessing::TextNormalizer;

/// Errors raised while converting a raw article into a normalized record
#[derive(Error, Debug)]
pub enum RecordError {
    /// A field the provider contract guarantees is absent or empty.
    /// This indicates a provider contract violation, not a recoverable
    /// per-record condition.
    #[error("article is missing required field `{0}`")]
    MissingField(&'static str),
}

/// Source attribution on a raw article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Provider-internal source identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable source name
    #[serde(default)]
    pub name: Option<String>,
}

/// Raw article as returned by the news search provider.
///
/// Only `title` and `source.name` are guaranteed by the provider
/// contract; everything else may be null on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArticle {
    /// Source attribution
    #[serde(default)]
    pub source: ArticleSource,
    /// Article author
    #[serde(default)]
    pub author: Option<String>,
    /// Article headline
    #[serde(default)]
    pub title: Option<String>,
    /// Article summary
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the full article
    #[serde(default)]
    pub url: Option<String>,
    /// Publication timestamp (RFC 3339 on the wire)
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    /// Partial article body
    #[serde(default)]
    pub content: Option<String>,
}

impl RawArticle {
    /// Create a raw article with a source name and title
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source: ArticleSource {
                id: None,
                name: Some(source.into()),
            },
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the publication timestamp
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Set the partial body content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Normalized analysis record built from a raw article.
///
/// Immutable after creation; later pipeline stages produce new records
/// instead of updating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// News source name
    pub source: String,
    /// Original, uncleaned title
    pub title: String,
    /// Cleaned concatenation of title and description
    pub text: String,
    /// Publication timestamp as received from the provider
    pub published_at: String,
}

impl NormalizedRecord {
    /// Parse the publication timestamp, when the provider sent a valid
    /// RFC 3339 value
    pub fn published_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Builds normalized records from raw provider articles
pub struct RecordBuilder {
    normalizer: TextNormalizer,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    /// Create a new record builder
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Convert a raw article into a normalized record.
    ///
    /// A missing or empty `title` or `source.name` is a
    /// [`RecordError::MissingField`]. A missing `description` is treated
    /// as an empty string. `text` is the normalized `title + " " +
    /// description`.
    pub fn build(&self, raw: &RawArticle) -> Result<NormalizedRecord, RecordError> {
        let title = raw
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(RecordError::MissingField("title"))?;
        let source = raw
            .source
            .name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(RecordError::MissingField("source.name"))?;
        let description = raw.description.as_deref().unwrap_or("");

        let text = self.normalizer.normalize(&format!("{} {}", title, description));

        Ok(NormalizedRecord {
            source: source.to_string(),
            title: title.to_string(),
            text,
            published_at: raw.published_at.clone().unwrap_or_default(),
        })
    }

    /// Convert a batch of raw articles, stopping at the first failure
    pub fn build_all(&self, raws: &[RawArticle]) -> Result<Vec<NormalizedRecord>, RecordError> {
        raws.iter().map(|raw| self.build(raw)).collect()
    }
}
