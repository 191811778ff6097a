//! Yosys integration.
//!
//! Synthesis is an external collaborator: a [`Synthesizer`] takes an RTL
//! source and hands back the location of a structured netlist report. The
//! only production implementation shells out to `yosys`; tests substitute
//! their own.

mod config;
mod design_path;
mod runner;

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub use config::{DEFAULT_SYNTH_TIMEOUT, SynthConfig};
pub use design_path::DesignPath;
pub use runner::YosysSynthesizer;

use crate::{LoadError, Netlist};

/// Failure of the synthesis collaborator for one design.
#[derive(Debug, Error)]
pub enum SynthError {
    /// No usable `yosys` binary.
    #[error("failed to find yosys binary: {0}")]
    YosysNotFound(String),
    /// The design source does not exist.
    #[error("design source not found: {}", .0.display())]
    MissingSource(PathBuf),
    /// The design source has an extension no frontend reads.
    #[error("{0}")]
    UnsupportedDesign(String),
    /// Spawning or waiting on the tool failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The tool exited unsuccessfully.
    #[error("yosys failed: status={status}\n{stderr}")]
    Failed {
        /// Exit status as reported by the OS.
        status: String,
        /// Captured standard error.
        stderr: String,
    },
    /// The tool ran longer than the configured budget and was killed.
    #[error("yosys timed out after {0:?}")]
    TimedOut(Duration),
    /// The tool exited successfully but wrote no report.
    #[error("yosys report file {} was not generated", .0.display())]
    MissingOutput(PathBuf),
}

/// A netlist report produced by a [`Synthesizer`].
///
/// Reports written to a temporary location are removed when this value is dropped.
#[derive(Debug)]
pub struct SynthReport {
    path: PathBuf,
    _temp: Option<tempfile::TempPath>,
}

impl SynthReport {
    /// A report that lives at `path` and is not owned by this value.
    #[must_use]
    pub fn persistent(path: PathBuf) -> Self {
        Self { path, _temp: None }
    }

    /// A report backed by a temporary file.
    #[must_use]
    pub fn temporary(temp: tempfile::TempPath) -> Self {
        Self {
            path: temp.to_path_buf(),
            _temp: Some(temp),
        }
    }

    /// Location of the report.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the report.
    pub fn load(&self) -> Result<Netlist, LoadError> {
        Netlist::load(&self.path)
    }
}

/// Turns one RTL source into a structured netlist report.
pub trait Synthesizer: Send + Sync {
    /// Synthesizes `source`. Nonzero exit or a missing report is an error.
    fn synthesize(&self, source: &Path) -> Result<SynthReport, SynthError>;
}
