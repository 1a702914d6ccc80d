//! # Clickbait Classification
//!
//! Rule-based clickbait detection for article titles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default clickbait trigger phrases.
///
/// Curated from common patterns in sensationalized headlines.
pub const DEFAULT_CLICKBAIT_PHRASES: [&str; 12] = [
    "shocking",
    "unbelievable",
    "you won't believe",
    "secret",
    "exposed",
    "surprising",
    "this will change",
    "the truth about",
    "miracle",
    "guaranteed",
    "instantly",
    "click here",
];

/// Clickbait classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClickbaitLabel {
    /// The title matched at least one trigger phrase
    Clickbait,
    /// No trigger phrase matched
    NotClickbait,
}

impl ClickbaitLabel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ClickbaitLabel::Clickbait => "Clickbait",
            ClickbaitLabel::NotClickbait => "NotClickbait",
        }
    }
}

impl fmt::Display for ClickbaitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rule-based clickbait classifier.
///
/// A title is `Clickbait` iff at least one lexicon phrase occurs in it as
/// a case-insensitive substring. No scoring, no word boundaries; a phrase
/// inside a longer token still counts. The phrase list is configuration,
/// not derived data.
pub struct ClickbaitClassifier {
    /// Trigger phrases, held lowercase
    phrases: Vec<String>,
}

impl Default for ClickbaitClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickbaitClassifier {
    /// Create a classifier with the default phrase list
    pub fn new() -> Self {
        Self::from_phrases(DEFAULT_CLICKBAIT_PHRASES)
    }

    /// Create a classifier from a custom phrase list
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Add one more substring trigger, case-insensitive
    pub fn add_phrase(&mut self, phrase: impl AsRef<str>) {
        self.phrases.push(phrase.as_ref().to_lowercase());
    }

    /// The active trigger phrases
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Classify a title
    pub fn classify(&self, title: &str) -> ClickbaitLabel {
        let title_lower = title.to_lowercase();
        if self.phrases.iter().any(|p| title_lower.contains(p.as_str())) {
            ClickbaitLabel::Clickbait
        } else {
            ClickbaitLabel::NotClickbait
        }
    }
}
