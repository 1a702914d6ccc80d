//! # newshound
//!
//! News clickbait detection and sentiment analysis pipeline.
//!
//! Fetches articles from a news search provider, classifies each title
//! as clickbait via phrase matching, scores article sentiment with a
//! pretrained classifier, and compares the resulting groups statistically
//! (t-test, Pearson/Spearman correlation, chi-square independence).
//!
//! ## Modules
//!
//! - `api` - News search provider client
//! - `data` - Text normalization and article records
//! - `analysis` - Clickbait and sentiment classifiers plus the pipeline
//! - `stats` - Group comparison statistics
//! - `export` - CSV export of annotated records
//! - `config` - Application configuration
//!
//! ## Example Usage
//!
//! ```no_run
//! use newshound::{
//!     ClickbaitClassifier, LexiconModel, Pipeline, RawArticle, SentimentClassifier,
//! };
//!
//! let model = LexiconModel::load().expect("sentiment model unavailable");
//! let pipeline = Pipeline::new(
//!     ClickbaitClassifier::new(),
//!     SentimentClassifier::new(Box::new(model)),
//! );
//!
//! let articles = vec![
//!     RawArticle::new("Daily Buzz", "You won't believe this rally")
//!         .with_description("Markets celebrate record growth."),
//! ];
//!
//! for record in pipeline.run(&articles).unwrap() {
//!     println!("{}: {}", record.record.title, record.combined_label());
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod data;
pub mod export;
pub mod stats;

// Re-exports for convenience
pub use analysis::{
    filter_by_topic, AnnotatedRecord, ClickbaitClassifier, ClickbaitLabel, LexiconModel,
    ModelError, Pipeline, PipelineError, RawSentiment, Sentiment, SentimentClassifier,
    SentimentLabel, SentimentModel,
};
pub use api::{NewsApiClient, NewsApiError, SortOrder};
pub use config::{load_config, AppConfig, ConfigError};
pub use data::{NormalizedRecord, RawArticle, RecordBuilder, RecordError, TextNormalizer};
pub use export::{export_csv, write_csv, ExportError};
pub use stats::{
    clickbait_sentiment_independence, compare_lengths, correlate_sentiment_and_length,
    ChiSquareResult, CorrelationPair, StatsError, TTestResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Maximum characters passed to the sentiment model; longer inputs
    /// are silently truncated
    pub const MODEL_INPUT_CHAR_LIMIT: usize = 512;

    /// Articles requested per search
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    /// Significance threshold used when reporting test results
    pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
}
