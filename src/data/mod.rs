//! # Data Module
//!
//! Text normalization and article record handling for the analysis
//! pipeline.

mod article;
mod preprocessing;

pub use article::{ArticleSource, NormalizedRecord, RawArticle, RecordBuilder, RecordError};
pub use preprocessing::{word_count, TextNormalizer};
