use std::path::PathBuf;

use cdepth_common::{LoadError, SynthError};
use cdepth_dataset::DatasetError;
use cdepth_graph::DepthError;
use cdepth_model::ModelError;
use thiserror::Error;

/// Failure of one pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input the whole run depends on does not exist.
    #[error("input not found: {}", .0.display())]
    MissingInput(PathBuf),
    /// Walking the input directory failed.
    #[error("failed to list designs: {0}")]
    Walk(#[from] walkdir::Error),
    /// Yosys could not produce a report.
    #[error(transparent)]
    Synth(#[from] SynthError),
    /// The report did not parse.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Depth analysis failed.
    #[error(transparent)]
    Depth(#[from] DepthError),
    /// A feature or result table could not be read or written.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Training, prediction, or model persistence failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}
