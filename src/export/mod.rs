//! # Export Module
//!
//! CSV export of the canonical annotated-record table.

use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::analysis::AnnotatedRecord;

/// Export error
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem failure
    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// CSV writing failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Column headers of the canonical result table
const HEADERS: [&str; 7] = [
    "Article",
    "Title",
    "Clickbait",
    "Sentiment",
    "Sentiment Score",
    "Combined Label",
    "Word Count",
];

/// Write annotated records as CSV to any writer.
///
/// One row per record, 1-based article numbering, scores with two
/// decimals.
pub fn write_csv<W: Write>(records: &[AnnotatedRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for (index, record) in records.iter().enumerate() {
        csv_writer.write_record([
            (index + 1).to_string(),
            record.record.title.clone(),
            record.clickbait.to_string(),
            record.sentiment.to_string(),
            format!("{:.2}", record.sentiment_score),
            record.combined_label().to_string(),
            record.word_count.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write annotated records to a CSV file, creating parent directories
pub fn export_csv<P: AsRef<Path>>(records: &[AnnotatedRecord], path: P) -> Result<(), ExportError> {
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(records, file)
}
