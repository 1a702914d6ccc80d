//! # Sentiment Classification
//!
//! Wraps the pretrained sentiment model and normalizes its raw output
//! into the fixed binary Positive/Negative vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::model::{ModelError, SentimentModel};
use crate::defaults;

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Positive polarity
    Positive,
    /// Negative polarity
    Negative,
}

impl SentimentLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Normalize a raw model label, case-insensitively.
    ///
    /// Anything outside the binary POSITIVE/NEGATIVE vocabulary is a
    /// contract violation and is rejected, never coerced.
    pub fn from_raw(raw: &str) -> Result<Self, ModelError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            _ => Err(ModelError::UnexpectedLabel(raw.to_string())),
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized sentiment classification result
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sentiment {
    /// Binary polarity label
    pub label: SentimentLabel,
    /// Confidence in [0, 1], rounded to two decimals
    pub score: f64,
}

/// Sentiment classifier backed by a pretrained model handle.
///
/// The model is constructed once at startup and passed in explicitly;
/// the classifier never reaches for ambient global state.
pub struct SentimentClassifier {
    model: Box<dyn SentimentModel>,
}

impl SentimentClassifier {
    /// Create a classifier around a loaded model
    pub fn new(model: Box<dyn SentimentModel>) -> Self {
        Self { model }
    }

    /// Classify a text.
    ///
    /// Input longer than [`defaults::MODEL_INPUT_CHAR_LIMIT`] characters
    /// is silently truncated to respect the model's input-length limit;
    /// the bound is counted in characters, not tokens. The raw label is
    /// folded to exactly `Positive`/`Negative` and the raw confidence is
    /// validated against [0, 1], then rounded to two decimals.
    pub fn classify(&self, text: &str) -> Result<Sentiment, ModelError> {
        let input = truncate_chars(text, defaults::MODEL_INPUT_CHAR_LIMIT);
        let raw = self.model.predict(input)?;

        let label = SentimentLabel::from_raw(&raw.label)?;
        if !(0.0..=1.0).contains(&raw.score) {
            return Err(ModelError::InvalidScore(raw.score));
        }

        Ok(Sentiment {
            label,
            score: (raw.score * 100.0).round() / 100.0,
        })
    }
}

/// Slice a string to its first `limit` characters (code points)
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::RawSentiment;

    /// Test double returning a fixed raw prediction
    struct StubModel {
        label: &'static str,
        score: f64,
    }

    impl SentimentModel for StubModel {
        fn predict(&self, _text: &str) -> Result<RawSentiment, ModelError> {
            Ok(RawSentiment {
                label: self.label.to_string(),
                score: self.score,
            })
        }
    }

    /// Test double recording the length of the text it was given
    struct LengthProbe;

    impl SentimentModel for LengthProbe {
        fn predict(&self, text: &str) -> Result<RawSentiment, ModelError> {
            Ok(RawSentiment {
                label: "POSITIVE".to_string(),
                score: (text.chars().count() as f64) / 1000.0,
            })
        }
    }

    #[test]
    fn test_normalizes_label_casing() {
        let classifier = SentimentClassifier::new(Box::new(StubModel {
            label: "positive",
            score: 0.9,
        }));
        let sentiment = classifier.classify("anything").unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Positive);

        let classifier = SentimentClassifier::new(Box::new(StubModel {
            label: "NEGATIVE",
            score: 0.9,
        }));
        let sentiment = classifier.classify("anything").unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_rejects_unexpected_label() {
        let classifier = SentimentClassifier::new(Box::new(StubModel {
            label: "NEUTRAL",
            score: 0.9,
        }));
        let err = classifier.classify("anything").unwrap_err();
        assert!(matches!(err, ModelError::UnexpectedLabel(_)));
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let classifier = SentimentClassifier::new(Box::new(StubModel {
            label: "POSITIVE",
            score: 1.2,
        }));
        let err = classifier.classify("anything").unwrap_err();
        assert!(matches!(err, ModelError::InvalidScore(_)));
    }

    #[test]
    fn test_rounds_score_to_two_decimals() {
        let classifier = SentimentClassifier::new(Box::new(StubModel {
            label: "POSITIVE",
            score: 0.98765,
        }));
        let sentiment = classifier.classify("anything").unwrap();
        assert!((sentiment.score - 0.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_truncates_long_input_by_characters() {
        let classifier = SentimentClassifier::new(Box::new(LengthProbe));
        // Multibyte characters: truncation counts code points, not bytes.
        let long = "ä".repeat(600);
        let sentiment = classifier.classify(&long).unwrap();
        assert!((sentiment.score - 0.51).abs() < 1e-9);

        let short = "ä".repeat(100);
        let sentiment = classifier.classify(&short).unwrap();
        assert!((sentiment.score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_truncate_chars_on_boundary() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("", 3), "");
    }
}
