use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing a tabular dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened or created.
    #[error("failed to access dataset {}: {source}", path.display())]
    Io {
        /// Dataset location.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// A row could not be encoded or decoded.
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        /// Dataset location.
        path: PathBuf,
        /// Underlying CSV failure.
        source: csv::Error,
    },
    /// Required columns are absent from the header.
    #[error("dataset {} is missing required columns: {}", path.display(), missing.join(", "))]
    Schema {
        /// Dataset location.
        path: PathBuf,
        /// Missing column names.
        missing: Vec<String>,
    },
}
