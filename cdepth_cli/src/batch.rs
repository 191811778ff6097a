//! Dataset-wide drivers.
//!
//! Designs are the unit of work: each is synthesized once and its graph is
//! shared by every row that names it. With `parallel` set, designs are spread
//! over the rayon pool; outputs always come back in input order.

use std::path::{Path, PathBuf};

use cdepth_common::Synthesizer;
use cdepth_dataset::{FeatureRow, ResultRow, extract_features};
use cdepth_graph::{DepthAnalyzer, DepthReport, DepthRules, LogicGraph};
use cdepth_model::DepthPredictor;
use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::{PipelineError, load_design, relative_name};

/// An item a driver gave up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// The design, or `design:signal` for a single row.
    pub item: String,
    /// Why it was skipped.
    pub reason: String,
}

/// What a driver produced, in input order, and what it skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<T> {
    /// Produced rows.
    pub rows: Vec<T>,
    /// Items given up on.
    pub skipped: Vec<Skipped>,
}

impl<T> Default for Batch<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> Batch<T> {
    /// Returns true if nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn from_outcomes(outcomes: Vec<(usize, Result<T, Skipped>)>) -> Self {
        let mut batch = Self::default();
        for (_, outcome) in outcomes.into_iter().sorted_by_key(|(idx, _)| *idx) {
            match outcome {
                Ok(row) => batch.rows.push(row),
                Err(skipped) => batch.skipped.push(skipped),
            }
        }
        batch
    }
}

fn skip(item: String, reason: &PipelineError) -> Skipped {
    warn!("Skipping {item}: {reason}");
    Skipped {
        item,
        reason: reason.to_string(),
    }
}

fn run<I, T, F>(items: Vec<I>, parallel: bool, work: F) -> Vec<T>
where
    I: Send,
    T: Send,
    F: Fn(I) -> T + Sync + Send,
{
    if parallel {
        items.into_par_iter().map(work).collect()
    } else {
        items.into_iter().map(work).collect()
    }
}

/// Synthesizes every design and concatenates one feature row per cell.
///
/// Rows carry proxy depth labels and name their design relative to `input_dir`.
pub fn extract_dataset(
    synth: &dyn Synthesizer,
    input_dir: &Path,
    designs: &[PathBuf],
    parallel: bool,
) -> Batch<FeatureRow> {
    let outcomes = run(designs.iter().enumerate().collect(), parallel, |(idx, design)| {
        let name = relative_name(input_dir, design);
        info!("Processing: {name}");
        let outcome = match load_design(synth, design) {
            Ok(netlist) => Ok(extract_features(&netlist, &name)),
            Err(e) => Err(skip(name, &e)),
        };
        (idx, outcome)
    });

    let mut batch = Batch::default();
    for (_, outcome) in outcomes.into_iter().sorted_by_key(|(idx, _)| *idx) {
        match outcome {
            Ok(rows) => batch.rows.extend(rows),
            Err(skipped) => batch.skipped.push(skipped),
        }
    }
    batch
}

/// Runs the depth analyzer for every row, grouping rows by design.
fn per_signal<T, F>(
    synth: &dyn Synthesizer,
    input_dir: &Path,
    rows: &[FeatureRow],
    rules: &DepthRules,
    parallel: bool,
    emit: F,
) -> Batch<T>
where
    T: Send,
    F: Fn(&FeatureRow, DepthReport) -> Result<T, PipelineError> + Sync,
{
    let mut by_design: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, row) in rows.iter().enumerate() {
        by_design.entry(row.file.as_str()).or_default().push(idx);
    }

    let groups: Vec<(&str, Vec<usize>)> = by_design.into_iter().collect();
    let outcomes = run(groups, parallel, |(file, members)| -> Vec<(usize, Result<T, Skipped>)> {
        let row_item = |idx: usize| format!("{file}:{}", rows[idx].signal);
        let path = input_dir.join(file);
        info!("Processing RTL: {}", path.display());

        let graph = match load_design(synth, &path) {
            Ok(netlist) => LogicGraph::build(&netlist),
            Err(e) => {
                let skipped = skip(file.to_string(), &e);
                return members
                    .into_iter()
                    .map(|idx| (idx, Err(Skipped { item: row_item(idx), ..skipped.clone() })))
                    .collect();
            }
        };
        let analyzer = match DepthAnalyzer::new(&graph, rules.clone()) {
            Ok(analyzer) => analyzer,
            Err(e) => {
                let skipped = skip(file.to_string(), &PipelineError::from(e));
                return members
                    .into_iter()
                    .map(|idx| (idx, Err(Skipped { item: row_item(idx), ..skipped.clone() })))
                    .collect();
            }
        };

        members
            .into_iter()
            .map(|idx| {
                let row = &rows[idx];
                let outcome = analyzer
                    .depth_of_signal(&row.signal)
                    .map_err(PipelineError::from)
                    .and_then(|report| {
                        info!("Combinational depth of '{}': {}", row.signal, report.depth);
                        emit(row, report)
                    })
                    .map_err(|e| skip(row_item(idx), &e));
                (idx, outcome)
            })
            .collect()
    });

    Batch::from_outcomes(outcomes.into_iter().flatten().collect())
}

/// Replaces every row's label with the depth the analyzer extracts for its signal.
pub fn relabel_dataset(
    synth: &dyn Synthesizer,
    input_dir: &Path,
    rows: &[FeatureRow],
    rules: &DepthRules,
    parallel: bool,
) -> Batch<FeatureRow> {
    per_signal(synth, input_dir, rows, rules, parallel, |row, report| {
        Ok(row.clone().with_extracted_depth(report.depth))
    })
}

/// Pairs the extracted depth of every row's signal with the model's estimate.
pub fn analyze_dataset(
    synth: &dyn Synthesizer,
    input_dir: &Path,
    rows: &[FeatureRow],
    rules: &DepthRules,
    predictor: &DepthPredictor,
    parallel: bool,
) -> Batch<ResultRow> {
    per_signal(synth, input_dir, rows, rules, parallel, |row, report| {
        let predicted_depth = predictor.predict(row.features())?;
        info!("Predicted combinational depth of '{}': {predicted_depth}", row.signal);
        Ok(ResultRow {
            rtl_file: row.file.clone(),
            signal: row.signal.clone(),
            extracted_depth: report.depth,
            predicted_depth,
        })
    })
}
