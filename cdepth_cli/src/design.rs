use std::path::{Path, PathBuf};

use cdepth_common::{DesignPath, Netlist, Synthesizer};
use itertools::Itertools;
use tracing::debug;
use walkdir::WalkDir;

use crate::PipelineError;

/// RTL sources under `dir`, sorted by path.
///
/// Only the top level is listed unless `recursive` is set. A missing
/// directory is an error; an empty one is not.
pub fn discover_designs(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::MissingInput(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 });

    let mut designs = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && DesignPath::is_rtl_source(entry.path()) {
            designs.push(entry.into_path());
        }
    }
    debug!("Found {} design(s) in {}", designs.len(), dir.display());

    Ok(designs.into_iter().sorted().collect())
}

/// How a design is named in datasets: its path relative to the input directory.
#[must_use]
pub fn relative_name(input_dir: &Path, design: &Path) -> String {
    design
        .strip_prefix(input_dir)
        .unwrap_or(design)
        .to_string_lossy()
        .into_owned()
}

/// Netlist of one design. JSON reports load directly; anything else is synthesized.
pub fn load_design(synth: &dyn Synthesizer, design: &Path) -> Result<Netlist, PipelineError> {
    let is_report = DesignPath::new(design.to_path_buf()).is_ok_and(|d| d.is_report());
    if is_report {
        return Ok(Netlist::load(design)?);
    }

    debug!("Running Yosys for {}", design.display());
    let report = synth.synthesize(design)?;
    Ok(report.load()?)
}
