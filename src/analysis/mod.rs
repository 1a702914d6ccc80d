//! # Analysis Module
//!
//! Clickbait classification, sentiment classification, and the pipeline
//! that runs both over article batches.

mod clickbait;
mod model;
mod pipeline;
mod sentiment;

pub use clickbait::{ClickbaitClassifier, ClickbaitLabel, DEFAULT_CLICKBAIT_PHRASES};
pub use model::{LexiconModel, ModelError, RawSentiment, SentimentModel};
pub use pipeline::{filter_by_topic, AnnotatedRecord, Pipeline, PipelineError};
pub use sentiment::{Sentiment, SentimentClassifier, SentimentLabel};
