//! Combinational depth between sequential elements and a target signal.
//!
//! Sequential elements are the starting points. For each one that can reach
//! the target, a path is chosen according to [`DepthMetric`] and its
//! depth-contributing cells are counted. The result is the maximum over all
//! starting points, or zero when none reaches the target.

use std::collections::VecDeque;

use contracts::*;
use thiserror::Error;
use tracing::debug;

use crate::{DepthMetric, DepthRules, LogicGraph, NodeIdx};

/// Reasons a depth query cannot produce a number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DepthError {
    /// The graph has no flip-flop or register node to start from.
    #[error("no flip-flop or register cells in the design")]
    NoSequentialElements,
    /// Longest-path search found a cycle that does not pass through a register.
    #[error("combinational loop through {node}")]
    CombinationalLoop {
        /// A node on the loop.
        node: String,
    },
}

/// Outcome of one depth query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepthReport {
    /// Depth-contributing cells on the chosen path; zero without a path.
    pub depth: u32,
    /// The chosen path from its sequential start to the target, inclusive.
    pub path: Vec<NodeIdx>,
    /// How many sequential elements reach the target.
    pub reachable_sources: usize,
}

impl DepthReport {
    /// Returns true if some sequential element reaches the target.
    #[must_use]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    fn keep_deeper(self, other: Self) -> Self {
        if other.depth > self.depth || (!self.has_path() && other.has_path()) {
            Self {
                reachable_sources: self.reachable_sources.max(other.reachable_sources),
                ..other
            }
        } else {
            Self {
                reachable_sources: self.reachable_sources.max(other.reachable_sources),
                ..self
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Read-only depth queries over one graph.
#[derive(Debug, Clone)]
pub struct DepthAnalyzer<'g> {
    graph: &'g LogicGraph,
    rules: DepthRules,
    sequential: Vec<NodeIdx>,
}

impl<'g> DepthAnalyzer<'g> {
    /// Collects the sequential elements of `graph`.
    pub fn new(graph: &'g LogicGraph, rules: DepthRules) -> Result<Self, DepthError> {
        let sequential: Vec<NodeIdx> = graph
            .node_indices()
            .filter(|idx| rules.is_sequential(graph.node(*idx)))
            .collect();

        if sequential.is_empty() {
            return Err(DepthError::NoSequentialElements);
        }
        debug!("{} sequential element(s)", sequential.len());

        Ok(Self {
            graph,
            rules,
            sequential,
        })
    }

    /// Sequential elements, in graph order.
    #[must_use]
    pub fn sequential_elements(&self) -> &[NodeIdx] {
        &self.sequential
    }

    /// The rules this analyzer applies.
    #[must_use]
    pub const fn rules(&self) -> &DepthRules {
        &self.rules
    }

    /// Depth of a signal named by cell name, net name, or bit number.
    ///
    /// Multi-bit nets report their deepest bit. Unknown names have no path.
    pub fn depth_of_signal(&self, signal: &str) -> Result<DepthReport, DepthError> {
        let targets = self.graph.resolve(signal);
        if targets.is_empty() {
            debug!("signal '{signal}' not in graph");
        }
        targets
            .into_iter()
            .try_fold(DepthReport::default(), |best, target| {
                Ok(best.keep_deeper(self.depth_to(target)?))
            })
    }

    /// Depth of one node.
    #[debug_ensures(ret.as_ref().map_or(true, |r| r.depth as usize <= r.path.len()))]
    pub fn depth_to(&self, target: NodeIdx) -> Result<DepthReport, DepthError> {
        if self.rules.is_sequential(self.graph.node(target)) {
            return Ok(DepthReport::default());
        }

        match self.rules.metric {
            DepthMetric::ShortestPath => Ok(self.shortest(target)),
            DepthMetric::LongestPath => self.longest(target),
        }
    }

    fn weight(&self, idx: NodeIdx) -> u32 {
        u32::from(self.rules.contributes(self.graph.node(idx)))
    }

    fn count(&self, path: &[NodeIdx]) -> u32 {
        path.iter().map(|idx| self.weight(*idx)).sum()
    }

    /// Edge distance from every node to `target`, by reverse breadth-first search.
    ///
    /// Sequential nodes get a distance but are not expanded, so no path runs
    /// through a register.
    fn distances_to(&self, target: NodeIdx) -> Vec<Option<u32>> {
        let mut dist = vec![None; self.graph.node_count()];
        let mut queue = VecDeque::new();
        dist[target.as_usize()] = Some(0);
        queue.push_back(target);

        while let Some(node) = queue.pop_front() {
            let next = dist[node.as_usize()].map_or(0, |d| d + 1);
            for pred in self.graph.fanin(node) {
                if dist[pred.as_usize()].is_none() {
                    dist[pred.as_usize()] = Some(next);
                    if !self.rules.is_sequential(self.graph.node(*pred)) {
                        queue.push_back(*pred);
                    }
                }
            }
        }

        dist
    }

    fn shortest(&self, target: NodeIdx) -> DepthReport {
        let dist = self.distances_to(target);
        let mut best = DepthReport::default();
        let mut reachable = 0;

        for &source in &self.sequential {
            let Some(mut remaining) = dist[source.as_usize()] else {
                continue;
            };
            reachable += 1;

            // Walk forward along strictly decreasing distance; first edge wins ties.
            let mut path = vec![source];
            let mut node = source;
            while remaining > 0 {
                let Some(next) = self
                    .graph
                    .fanout(node)
                    .iter()
                    .copied()
                    .find(|succ| {
                        dist[succ.as_usize()] == Some(remaining - 1)
                            && !self.rules.is_sequential(self.graph.node(*succ))
                    })
                else {
                    break;
                };
                path.push(next);
                node = next;
                remaining -= 1;
            }

            let depth = self.count(&path);
            if !best.has_path() || depth > best.depth {
                best = DepthReport {
                    depth,
                    path,
                    reachable_sources: 0,
                };
            }
        }

        best.reachable_sources = reachable;
        best
    }

    fn longest(&self, target: NodeIdx) -> Result<DepthReport, DepthError> {
        let n = self.graph.node_count();
        let mut mark = vec![Mark::Unvisited; n];
        // Best count of contributing cells on any register-started path ending here.
        let mut best: Vec<Option<u32>> = vec![None; n];
        let mut via: Vec<Option<NodeIdx>> = vec![None; n];

        let mut stack: Vec<(NodeIdx, usize)> = vec![(target, 0)];
        mark[target.as_usize()] = Mark::Active;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            let preds = self.graph.fanin(node);

            if let Some(&pred) = preds.get(cursor) {
                frame.1 += 1;
                if self.rules.is_sequential(self.graph.node(pred)) {
                    continue;
                }
                match mark[pred.as_usize()] {
                    Mark::Unvisited => {
                        mark[pred.as_usize()] = Mark::Active;
                        stack.push((pred, 0));
                    }
                    Mark::Active => {
                        return Err(DepthError::CombinationalLoop {
                            node: self.graph.node(pred).to_string(),
                        });
                    }
                    Mark::Done => {}
                }
                continue;
            }

            let mut incoming: Option<(u32, NodeIdx)> = None;
            for &pred in preds {
                let candidate = if self.rules.is_sequential(self.graph.node(pred)) {
                    Some(0)
                } else {
                    best[pred.as_usize()]
                };
                if let Some(value) = candidate {
                    if incoming.is_none_or(|(current, _)| value > current) {
                        incoming = Some((value, pred));
                    }
                }
            }
            if let Some((value, pred)) = incoming {
                best[node.as_usize()] = Some(value + self.weight(node));
                via[node.as_usize()] = Some(pred);
            }
            mark[node.as_usize()] = Mark::Done;
            stack.pop();
        }

        let Some(depth) = best[target.as_usize()] else {
            return Ok(DepthReport::default());
        };

        let mut path = vec![target];
        let mut node = target;
        while let Some(pred) = via[node.as_usize()] {
            path.push(pred);
            node = pred;
        }
        path.reverse();

        let reachable_sources = self.reaching_sources(target);
        Ok(DepthReport {
            depth,
            path,
            reachable_sources,
        })
    }

    fn reaching_sources(&self, target: NodeIdx) -> usize {
        let dist = self.distances_to(target);
        self.sequential
            .iter()
            .filter(|source| dist[source.as_usize()].is_some())
            .count()
    }
}

/// Builds an analyzer and answers a single query.
pub fn combinational_depth(
    graph: &LogicGraph,
    rules: DepthRules,
    signal: &str,
) -> Result<DepthReport, DepthError> {
    DepthAnalyzer::new(graph, rules)?.depth_of_signal(signal)
}
