//! Batch drivers behind the `cdepth` binary.
//!
//! Each driver walks a set of designs or dataset rows, synthesizes through a
//! [`cdepth_common::Synthesizer`], and collects what succeeded. Failures of
//! single items are logged and recorded as [`Skipped`], never fatal.

mod batch;
mod design;
mod error;
mod single;

pub use batch::{Batch, Skipped, analyze_dataset, extract_dataset, relabel_dataset};
pub use design::{discover_designs, load_design, relative_name};
pub use error::PipelineError;
pub use single::{GraphSummary, SignalDepth, graph_summary, signal_depth};
