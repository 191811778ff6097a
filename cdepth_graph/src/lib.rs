//! Logic graph construction and combinational depth search.
//!
//! A [`LogicGraph`] is built fresh from each [`cdepth_common::Netlist`] and
//! only read afterwards; a [`DepthAnalyzer`] borrows it to answer any number
//! of per-signal depth queries.

mod depth;
mod graph;
mod node;
mod rules;

pub use depth::{DepthAnalyzer, DepthError, DepthReport, combinational_depth};
pub use graph::LogicGraph;
pub use node::{Node, NodeIdx, NodeKey};
pub use rules::{DepthMetric, DepthRules};
