//! One design at a time: depth of one signal, or graph statistics.

use std::path::Path;

use cdepth_common::{PortUsage, Synthesizer, port_usage};
use cdepth_dataset::{Features, extract_features};
use cdepth_graph::{DepthAnalyzer, DepthReport, DepthRules, LogicGraph};
use tracing::info;

use crate::{PipelineError, load_design};

/// Extracted depth of one signal, with the features of its cell when it names one.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDepth {
    /// Analyzer outcome.
    pub report: DepthReport,
    /// Display names of the nodes on the chosen path.
    pub path: Vec<String>,
    /// Model inputs of the cell named `signal`, if any.
    pub features: Option<Features>,
}

/// Synthesizes `design` and measures the combinational depth of `signal`.
pub fn signal_depth(
    synth: &dyn Synthesizer,
    design: &Path,
    signal: &str,
    rules: &DepthRules,
) -> Result<SignalDepth, PipelineError> {
    let netlist = load_design(synth, design)?;
    let graph = LogicGraph::build(&netlist);
    let analyzer = DepthAnalyzer::new(&graph, rules.clone())?;

    info!("Finding combinational depth for signal '{signal}'");
    let report = analyzer.depth_of_signal(signal)?;
    let path = report
        .path
        .iter()
        .map(|idx| graph.node(*idx).key().to_string())
        .collect();
    let features = extract_features(&netlist, &design.to_string_lossy())
        .into_iter()
        .find(|row| row.signal == signal)
        .map(|row| row.features());

    Ok(SignalDepth {
        report,
        path,
        features,
    })
}

/// Size of a design's graph and how its cells use port names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSummary {
    /// Modules in the report.
    pub modules: usize,
    /// Cells across all modules.
    pub cells: usize,
    /// Graph nodes, cells and nets together.
    pub nodes: usize,
    /// Graph edges, one per connected bit.
    pub edges: usize,
    /// Cells the default rules treat as sequential.
    pub sequential: usize,
    /// How often each port name occurs on cells.
    pub ports: PortUsage,
}

/// Builds the graph of `design` and reports its counts.
pub fn graph_summary(synth: &dyn Synthesizer, design: &Path) -> Result<GraphSummary, PipelineError> {
    let netlist = load_design(synth, design)?;
    let graph = LogicGraph::build(&netlist);
    let rules = DepthRules::default();
    let sequential = graph
        .node_indices()
        .filter(|idx| rules.is_sequential(graph.node(*idx)))
        .count();

    Ok(GraphSummary {
        modules: netlist.module_count(),
        cells: graph.cell_count(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        sequential,
        ports: port_usage(&netlist),
    })
}
