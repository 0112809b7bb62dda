// Glucose ingestion: CSV upload → validated samples → time-ordered series.
// One loader/normalizer serves every dashboard; `DashboardConfig` carries the
// cosmetic differences between them.

use thiserror::Error;

pub mod dashboard;
pub mod handlers;
pub mod loader;
pub mod normalizer;
pub mod sample;

#[derive(Debug, Error)]
pub enum GlucoseError {
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// `row` counts data records (header and blank lines excluded);
    /// `line` is the 1-based physical line in the file.
    #[error("Row {row} (file line {line}) is malformed: {reason}")]
    MalformedRow {
        row: usize,
        line: u64,
        reason: String,
    },

    #[error("Duplicate timestamp {timestamp} at row {row}")]
    DuplicateTimestamp { row: usize, timestamp: String },

    #[error("CSV contains no data rows")]
    Empty,

    #[error("CSV could not be read: {0}")]
    Csv(#[from] csv::Error),
}
