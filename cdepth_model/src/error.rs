use std::path::PathBuf;

use cdepth_dataset::DatasetError;
use thiserror::Error;

/// Failure training, loading, or querying a depth model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No model was trained or the artifact does not exist.
    #[error("no trained depth model{}", .path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    MissingModel {
        /// Artifact location, when one was requested.
        path: Option<PathBuf>,
    },
    /// Too few labeled rows to split into training and evaluation sets.
    #[error("need at least 2 labeled rows to train, found {rows}")]
    EmptyDataset {
        /// Labeled rows available.
        rows: usize,
    },
    /// A training row has no depth label.
    #[error("row for signal '{signal}' in {file} has no Logic Depth label")]
    Unlabeled {
        /// Originating design file.
        file: String,
        /// Cell name.
        signal: String,
    },
    /// Samples and targets differ in length.
    #[error("{samples} samples but {targets} targets")]
    LengthMismatch {
        /// Sample count.
        samples: usize,
        /// Target count.
        targets: usize,
    },
    /// The artifact could not be read or written.
    #[error("failed to access model {}: {source}", path.display())]
    Io {
        /// Artifact location.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// The artifact is not a valid model document.
    #[error("invalid model document {}: {source}", path.display())]
    Json {
        /// Artifact location.
        path: PathBuf,
        /// Underlying decode failure.
        source: serde_json::Error,
    },
    /// The artifact was written by an incompatible version.
    #[error("model {} has format version {found}, expected {expected}", path.display())]
    UnsupportedFormat {
        /// Artifact location.
        path: PathBuf,
        /// Version in the document.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
    /// The training dataset could not be read.
    #[error(transparent)]
    Schema(#[from] DatasetError),
}
