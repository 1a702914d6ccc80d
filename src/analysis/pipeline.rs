//! # Analysis Pipeline
//!
//! Orchestrates record building, clickbait classification, and sentiment
//! scoring over a batch of raw articles.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::clickbait::{ClickbaitClassifier, ClickbaitLabel};
use super::model::ModelError;
use super::sentiment::{SentimentClassifier, SentimentLabel};
use crate::data::{word_count, NormalizedRecord, RawArticle, RecordBuilder, RecordError};

/// Errors aborting a pipeline run.
///
/// The pipeline is fail-fast: the first failing article stops the whole
/// batch, carrying the zero-based index of the offending article.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A raw article violated the provider contract
    #[error("article {index}: {source}")]
    Record {
        /// Zero-based position in the input batch
        index: usize,
        #[source]
        source: RecordError,
    },

    /// The sentiment model failed on one article
    #[error("article {index}: {source}")]
    Model {
        /// Zero-based position in the input batch
        index: usize,
        #[source]
        source: ModelError,
    },
}

/// Fully annotated analysis record: a normalized article plus its
/// clickbait and sentiment labels and derived word count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    /// The underlying normalized record
    pub record: NormalizedRecord,
    /// Clickbait classification of the original title
    pub clickbait: ClickbaitLabel,
    /// Sentiment polarity of the normalized text
    pub sentiment: SentimentLabel,
    /// Sentiment confidence in [0, 1]
    pub sentiment_score: f64,
    /// Whitespace-delimited token count of the normalized text
    pub word_count: usize,
}

impl AnnotatedRecord {
    /// Combined classification label.
    ///
    /// The full vocabulary lives in this one mapping so the rendering
    /// cannot drift between call sites.
    pub fn combined_label(&self) -> &'static str {
        match (self.clickbait, self.sentiment) {
            (ClickbaitLabel::Clickbait, SentimentLabel::Positive) => "Clickbait + Positive",
            (ClickbaitLabel::Clickbait, SentimentLabel::Negative) => "Clickbait + Negative",
            (ClickbaitLabel::NotClickbait, SentimentLabel::Positive) => "NotClickbait + Positive",
            (ClickbaitLabel::NotClickbait, SentimentLabel::Negative) => "NotClickbait + Negative",
        }
    }
}

/// Keep only records whose title or normalized text contains the topic,
/// case-insensitively.
///
/// Relevance filtering happens here, over normalized records, before the
/// annotation stage; the pipeline itself never filters.
pub fn filter_by_topic(records: Vec<NormalizedRecord>, topic: &str) -> Vec<NormalizedRecord> {
    let needle = topic.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle) || r.text.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Analysis pipeline over raw articles.
///
/// Stateless apart from the classifiers it borrows its behavior from;
/// every run produces fresh records and mutates nothing.
pub struct Pipeline {
    builder: RecordBuilder,
    clickbait: ClickbaitClassifier,
    sentiment: SentimentClassifier,
}

impl Pipeline {
    /// Create a pipeline from its two classifiers
    pub fn new(clickbait: ClickbaitClassifier, sentiment: SentimentClassifier) -> Self {
        Self {
            builder: RecordBuilder::new(),
            clickbait,
            sentiment,
        }
    }

    /// Run the full pipeline over a batch of raw articles.
    ///
    /// One output per input, in input order, no filtering. The first
    /// failing article aborts the run.
    pub fn run(&self, articles: &[RawArticle]) -> Result<Vec<AnnotatedRecord>, PipelineError> {
        let mut annotated = Vec::with_capacity(articles.len());
        for (index, raw) in articles.iter().enumerate() {
            let record = self
                .builder
                .build(raw)
                .map_err(|source| PipelineError::Record { index, source })?;
            annotated.push(self.annotate_at(index, record)?);
        }
        Ok(annotated)
    }

    /// Annotate already-normalized records, in order.
    ///
    /// Used after upstream topic filtering; same fail-fast semantics as
    /// [`run`](Self::run).
    pub fn run_records(
        &self,
        records: Vec<NormalizedRecord>,
    ) -> Result<Vec<AnnotatedRecord>, PipelineError> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| self.annotate_at(index, record))
            .collect()
    }

    /// Annotate a single normalized record
    pub fn annotate(&self, record: NormalizedRecord) -> Result<AnnotatedRecord, ModelError> {
        let clickbait = self.clickbait.classify(&record.title);
        let sentiment = self.sentiment.classify(&record.text)?;
        let word_count = word_count(&record.text);

        debug!(
            title = %record.title,
            clickbait = %clickbait,
            sentiment = %sentiment.label,
            "annotated article"
        );

        Ok(AnnotatedRecord {
            record,
            clickbait,
            sentiment: sentiment.label,
            sentiment_score: sentiment.score,
            word_count,
        })
    }

    fn annotate_at(
        &self,
        index: usize,
        record: NormalizedRecord,
    ) -> Result<AnnotatedRecord, PipelineError> {
        self.annotate(record)
            .map_err(|source| PipelineError::Model { index, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{RawSentiment, SentimentModel};

    /// Test double classifying by a marker word in the text
    struct MarkerModel;

    impl SentimentModel for MarkerModel {
        fn predict(&self, text: &str) -> Result<RawSentiment, ModelError> {
            if text.contains("dreadful") {
                Ok(RawSentiment {
                    label: "NEGATIVE".to_string(),
                    score: 0.97,
                })
            } else {
                Ok(RawSentiment {
                    label: "POSITIVE".to_string(),
                    score: 0.93,
                })
            }
        }
    }

    /// Test double that always fails
    struct BrokenModel;

    impl SentimentModel for BrokenModel {
        fn predict(&self, _text: &str) -> Result<RawSentiment, ModelError> {
            Err(ModelError::Unavailable("backend gone".to_string()))
        }
    }

    fn marker_pipeline() -> Pipeline {
        Pipeline::new(
            ClickbaitClassifier::new(),
            SentimentClassifier::new(Box::new(MarkerModel)),
        )
    }

    #[test]
    fn test_end_to_end_two_articles() {
        let articles = vec![
            RawArticle::new("Daily Buzz", "A shocking turn of events")
                .with_description("Everything about this is wonderful and great."),
            RawArticle::new("The Ledger", "Quarterly report released")
                .with_description("The outlook is dreadful."),
        ];

        let annotated = marker_pipeline().run(&articles).unwrap();
        assert_eq!(annotated.len(), 2);

        assert_eq!(annotated[0].clickbait, ClickbaitLabel::Clickbait);
        assert_eq!(annotated[0].sentiment, SentimentLabel::Positive);
        assert_eq!(annotated[0].combined_label(), "Clickbait + Positive");

        assert_eq!(annotated[1].clickbait, ClickbaitLabel::NotClickbait);
        assert_eq!(annotated[1].sentiment, SentimentLabel::Negative);
        assert_eq!(annotated[1].combined_label(), "NotClickbait + Negative");
    }

    #[test]
    fn test_preserves_input_order_and_counts_words() {
        let articles = vec![
            RawArticle::new("A", "First title").with_description("two words"),
            RawArticle::new("B", "Second title here"),
        ];
        let annotated = marker_pipeline().run(&articles).unwrap();
        assert_eq!(annotated[0].record.title, "First title");
        assert_eq!(annotated[1].record.title, "Second title here");
        // "first title two words" / "second title here"
        assert_eq!(annotated[0].word_count, 4);
        assert_eq!(annotated[1].word_count, 3);
    }

    #[test]
    fn test_missing_title_aborts_run_with_index() {
        let mut bad = RawArticle::new("B", "x");
        bad.title = None;
        let articles = vec![RawArticle::new("A", "Fine title"), bad];

        let err = marker_pipeline().run(&articles).unwrap_err();
        match err {
            PipelineError::Record { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_model_failure_aborts_run() {
        let pipeline = Pipeline::new(
            ClickbaitClassifier::new(),
            SentimentClassifier::new(Box::new(BrokenModel)),
        );
        let articles = vec![RawArticle::new("A", "Fine title")];
        let err = pipeline.run(&articles).unwrap_err();
        assert!(matches!(err, PipelineError::Model { index: 0, .. }));
    }

    #[test]
    fn test_filter_by_topic_matches_title_or_text() {
        let builder = RecordBuilder::new();
        let records = builder
            .build_all(&[
                RawArticle::new("A", "Bitcoin rallies again"),
                RawArticle::new("B", "Markets quiet").with_description("No BITCOIN mention? Yes."),
                RawArticle::new("C", "Nothing relevant"),
            ])
            .unwrap();

        let filtered = filter_by_topic(records, "bitcoin");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].title, "Bitcoin rallies again");
        assert_eq!(filtered[1].title, "Markets quiet");
    }

    #[test]
    fn test_clickbait_uses_original_title_not_normalized_text() {
        // Normalization strips the apostrophe ("won't" -> "wont"), so the
        // trigger phrase only matches against the original title.
        let articles = vec![RawArticle::new("A", "You won't believe the weather")
            .with_description("routine summary")];
        let annotated = marker_pipeline().run(&articles).unwrap();
        assert_eq!(annotated[0].clickbait, ClickbaitLabel::Clickbait);
        assert!(!annotated[0].record.text.contains("won't"));
    }
}
