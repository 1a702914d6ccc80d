//! # Sentiment Model Backend
//!
//! The pretrained-model seam for sentiment scoring. The pipeline only
//! sees the [`SentimentModel`] trait; the shipped backend is a
//! word-polarity lexicon scorer with fixed pretrained weights.

use std::collections::HashMap;
use thiserror::Error;

/// Errors from the sentiment model collaborator
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model could not be loaded. Fatal at startup; never retried
    /// per call.
    #[error("sentiment model unavailable: {0}")]
    Unavailable(String),

    /// The model emitted a label outside the binary POSITIVE/NEGATIVE
    /// vocabulary
    #[error("model returned unexpected label `{0}`")]
    UnexpectedLabel(String),

    /// The model emitted a confidence outside [0, 1]
    #[error("model confidence {0} is outside [0, 1]")]
    InvalidScore(f64),
}

/// Raw model output before label/score normalization
#[derive(Debug, Clone)]
pub struct RawSentiment {
    /// Raw label in the model's own casing (e.g. "POSITIVE")
    pub label: String,
    /// Raw confidence score
    pub score: f64,
}

/// Opaque pretrained sentiment classifier.
///
/// Implementations map a text to a raw (label, confidence) pair in a
/// binary POSITIVE/NEGATIVE vocabulary. A model is loaded once per
/// process and is read-only afterwards, so `predict` takes `&self` and
/// implementations must be safe for concurrent reads.
pub trait SentimentModel: Send + Sync {
    /// Score a single text
    fn predict(&self, text: &str) -> Result<RawSentiment, ModelError>;
}

/// Positive polarity words with weights
const POSITIVE_ENTRIES: [(&str, f64); 28] = [
    ("good", 0.5),
    ("great", 0.6),
    ("excellent", 0.8),
    ("amazing", 0.7),
    ("wonderful", 0.7),
    ("success", 0.6),
    ("successful", 0.6),
    ("win", 0.5),
    ("wins", 0.5),
    ("growth", 0.5),
    ("improve", 0.5),
    ("improves", 0.5),
    ("improved", 0.5),
    ("breakthrough", 0.7),
    ("record", 0.4),
    ("strong", 0.4),
    ("gain", 0.5),
    ("gains", 0.5),
    ("hope", 0.4),
    ("progress", 0.5),
    ("benefit", 0.4),
    ("celebrate", 0.6),
    ("discover", 0.4),
    ("discovery", 0.4),
    ("positive", 0.5),
    ("boost", 0.5),
    ("recovery", 0.5),
    ("thriving", 0.6),
];

/// Negative polarity words with weights
const NEGATIVE_ENTRIES: [(&str, f64); 30] = [
    ("bad", -0.5),
    ("terrible", -0.7),
    ("awful", -0.7),
    ("horrible", -0.7),
    ("crisis", -0.7),
    ("crash", -0.7),
    ("disaster", -0.8),
    ("fear", -0.5),
    ("threat", -0.5),
    ("decline", -0.5),
    ("loss", -0.5),
    ("losses", -0.5),
    ("death", -0.6),
    ("war", -0.6),
    ("alarming", -0.6),
    ("concern", -0.4),
    ("concerns", -0.4),
    ("risk", -0.4),
    ("fraud", -0.8),
    ("scam", -0.8),
    ("fail", -0.6),
    ("fails", -0.6),
    ("failure", -0.6),
    ("warning", -0.4),
    ("collapse", -0.7),
    ("scandal", -0.6),
    ("recession", -0.6),
    ("negative", -0.5),
    ("layoffs", -0.5),
    ("dreadful", -0.7),
];

/// Pretrained word-polarity sentiment model.
///
/// Scores a text by summing fixed word weights and reports the dominant
/// polarity with a confidence proportional to how one-sided the matched
/// weights are. Always emits POSITIVE or NEGATIVE, never a third class;
/// a text with no matched words scores POSITIVE at chance confidence,
/// mirroring a softmax classifier's floor of 0.5.
#[derive(Debug)]
pub struct LexiconModel {
    /// Word to signed weight mapping
    weights: HashMap<String, f64>,
}

impl LexiconModel {
    /// Load the model with its pretrained weights.
    ///
    /// Happens once per process at startup; a failure here is fatal to
    /// the process.
    pub fn load() -> Result<Self, ModelError> {
        Self::from_entries(POSITIVE_ENTRIES.iter().chain(NEGATIVE_ENTRIES.iter()))
    }

    /// Build a model from explicit (word, weight) entries
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a (&'a str, f64)>,
    {
        let weights: HashMap<String, f64> = entries
            .into_iter()
            .map(|(word, weight)| (word.to_lowercase(), *weight))
            .collect();

        if weights.is_empty() {
            return Err(ModelError::Unavailable("empty polarity lexicon".to_string()));
        }

        Ok(Self { weights })
    }
}

impl SentimentModel for LexiconModel {
    fn predict(&self, text: &str) -> Result<RawSentiment, ModelError> {
        let mut positive = 0.0;
        let mut negative = 0.0;

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            if let Some(weight) = self.weights.get(token) {
                if *weight >= 0.0 {
                    positive += weight;
                } else {
                    negative -= weight;
                }
            }
        }

        let total = positive + negative;
        let (label, score) = if total == 0.0 {
            ("POSITIVE", 0.5)
        } else if positive >= negative {
            ("POSITIVE", 0.5 + 0.5 * (positive - negative) / total)
        } else {
            ("NEGATIVE", 0.5 + 0.5 * (negative - positive) / total)
        };

        Ok(RawSentiment {
            label: label.to_string(),
            score,
        })
    }
}
