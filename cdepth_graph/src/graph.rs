//! Directed signal-flow graph of a netlist.
//!
//! Nodes are cells (tagged with their gate type) and the net bits that
//! appear as their connection endpoints. Edges follow signal flow: a cell's
//! output port yields `cell -> net`, every other port yields `net -> cell`.
//! So a register drives its `Q` net, which drives the gates reading it.
//! Repeated connections between the same pair are kept as parallel edges.

use std::collections::HashMap;

use cdepth_common::{Netlist, SignalId};
use tracing::info;

use crate::{Node, NodeIdx, NodeKey};

/// Signal-flow graph built from one netlist.
#[derive(Debug, Clone, Default)]
pub struct LogicGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeKey, NodeIdx>,
    fanout: Vec<Vec<NodeIdx>>,
    fanin: Vec<Vec<NodeIdx>>,
    edge_count: usize,
    /// Cell name to matching cell nodes, across modules.
    cell_names: HashMap<String, Vec<NodeIdx>>,
    /// Named nets and ports to the bit nodes they cover.
    net_names: HashMap<String, Vec<NodeIdx>>,
    /// Endpoint identifier to matching net nodes, across modules.
    signals: HashMap<SignalId, Vec<NodeIdx>>,
}

impl LogicGraph {
    /// Builds the graph for every cell of every module of `netlist`.
    #[must_use]
    pub fn build(netlist: &Netlist) -> Self {
        let mut graph = Self::default();

        for (module_idx, (_, module)) in netlist.modules().enumerate() {
            let module_idx = module_idx as u32;

            for (cell_name, cell) in &module.cells {
                let cell_node = graph.intern(Node::cell(
                    module_idx,
                    cell_name.clone(),
                    cell.cell_type.clone(),
                ));

                for (port, bits) in &cell.connections {
                    let drives = cell.port_direction(port).drives();
                    for bit in bits {
                        let net_node = graph.intern(Node::net(module_idx, bit.clone()));
                        if drives {
                            graph.add_edge(cell_node, net_node);
                        } else {
                            graph.add_edge(net_node, cell_node);
                        }
                    }
                }
            }

            let named = module
                .netnames
                .iter()
                .map(|(name, net)| (name, &net.bits))
                .chain(module.ports.iter().map(|(name, port)| (name, &port.bits)));
            for (name, bits) in named {
                let nodes: Vec<NodeIdx> = bits
                    .iter()
                    .filter_map(|bit| {
                        graph
                            .index
                            .get(&NodeKey::Net {
                                module: module_idx,
                                signal: bit.clone(),
                            })
                            .copied()
                    })
                    .collect();
                let entry = graph.net_names.entry(name.clone()).or_default();
                for node in nodes {
                    if !entry.contains(&node) {
                        entry.push(node);
                    }
                }
            }
        }

        info!("Nodes in graph: {}", graph.node_count());
        info!("Edges in graph: {}", graph.edge_count());

        graph
    }

    fn intern(&mut self, node: Node) -> NodeIdx {
        if let Some(idx) = self.index.get(node.key()) {
            return *idx;
        }

        let idx = NodeIdx::at(self.nodes.len());
        match node.key() {
            NodeKey::Cell { name, .. } => {
                self.cell_names.entry(name.clone()).or_default().push(idx);
            }
            NodeKey::Net { signal, .. } => {
                self.signals.entry(signal.clone()).or_default().push(idx);
            }
        }
        self.index.insert(node.key().clone(), idx);
        self.nodes.push(node);
        self.fanout.push(Vec::new());
        self.fanin.push(Vec::new());
        idx
    }

    fn add_edge(&mut self, from: NodeIdx, to: NodeIdx) {
        self.fanout[from.as_usize()].push(to);
        self.fanin[to.as_usize()].push(from);
        self.edge_count += 1;
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, parallel edges included.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of cell nodes.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_cell()).count()
    }

    /// Resolves a node index.
    #[must_use]
    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.as_usize()]
    }

    /// All node indices, in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.nodes.len()).map(NodeIdx::at)
    }

    /// Nodes driven by `idx`, one entry per edge.
    #[must_use]
    pub fn fanout(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.fanout[idx.as_usize()]
    }

    /// Nodes driving `idx`, one entry per edge.
    #[must_use]
    pub fn fanin(&self, idx: NodeIdx) -> &[NodeIdx] {
        &self.fanin[idx.as_usize()]
    }

    /// Resolves a user-facing signal identifier to graph nodes.
    ///
    /// Cell names win, then net and port names, then raw bit numbers. An
    /// identifier that matches nothing resolves to no nodes.
    #[must_use]
    pub fn resolve(&self, signal: &str) -> Vec<NodeIdx> {
        if let Some(cells) = self.cell_names.get(signal) {
            return cells.clone();
        }
        if let Some(nets) = self.net_names.get(signal) {
            return nets.clone();
        }
        self.signals
            .get(&SignalId::parse(signal))
            .cloned()
            .unwrap_or_default()
    }
}
