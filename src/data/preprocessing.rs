//! # Text Normalization
//!
//! Text cleaning for article analysis: URL removal, punctuation removal,
//! whitespace collapsing, lowercasing.

use regex::Regex;

/// Text normalizer for article titles and descriptions.
///
/// Applies a fixed four-step cleaning sequence. Every step is a total
/// function; `normalize` never fails, whatever the input.
pub struct TextNormalizer {
    /// Regex for URL removal (anything starting with "http")
    url_regex: Regex,
    /// Regex matching every character that is neither a word character
    /// nor whitespace
    punct_regex: Regex,
    /// Regex for whitespace runs
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    /// Create a new text normalizer
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"http\S+").unwrap(),
            punct_regex: Regex::new(r"[^\w\s]").unwrap(),
            whitespace_regex: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize text for analysis
    ///
    /// Steps, in order:
    /// 1. Remove URL-like substrings (`http` followed by non-whitespace)
    /// 2. Remove every non-word, non-whitespace character. Word characters
    ///    are Unicode-aware `\w`, the same definition Python's `re` uses
    ///    on `str`
    /// 3. Collapse whitespace runs to a single ASCII space. The result is
    ///    NOT trimmed; a leading or trailing run survives as one space
    /// 4. Lowercase
    pub fn normalize(&self, text: &str) -> String {
        let no_urls = self.url_regex.replace_all(text, "");
        let no_punct = self.punct_regex.replace_all(&no_urls, "");
        let collapsed = self.whitespace_regex.replace_all(&no_punct, " ");
        collapsed.to_lowercase()
    }
}

/// Count whitespace-delimited tokens in a text.
///
/// `word_count("")` is 0; leading and trailing whitespace contribute
/// nothing.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
