use std::fmt;

use cdepth_common::SignalId;
use contracts::*;

/// Position of a node in its [`crate::LogicGraph`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(u32);

impl NodeIdx {
    #[requires(position <= u32::MAX as usize)]
    pub(crate) fn at(position: usize) -> Self {
        Self(position as u32)
    }

    /// Slot of this node in per-node vectors.
    #[ensures(ret <= u32::MAX as usize)]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a node. Cells and nets never collide, and both are scoped to
/// the module (by report position) they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    /// An instantiated cell.
    Cell {
        /// Module position in the report.
        module: u32,
        /// Cell name.
        name: String,
    },
    /// A net bit or constant that appears as a connection endpoint.
    Net {
        /// Module position in the report.
        module: u32,
        /// Endpoint identifier.
        signal: SignalId,
    },
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { name, .. } => write!(f, "{name}"),
            Self::Net { signal, .. } => write!(f, "net {signal}"),
        }
    }
}

/// A graph node and its gate-type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: NodeKey,
    cell_type: Option<String>,
}

impl Node {
    pub(crate) const fn cell(module: u32, name: String, cell_type: String) -> Self {
        Self {
            key: NodeKey::Cell { module, name },
            cell_type: Some(cell_type),
        }
    }

    pub(crate) const fn net(module: u32, signal: SignalId) -> Self {
        Self {
            key: NodeKey::Net { module, signal },
            cell_type: None,
        }
    }

    /// The node's identity.
    #[must_use]
    pub const fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Raw gate type for cell nodes; `None` for nets.
    #[must_use]
    pub fn cell_type(&self) -> Option<&str> {
        self.cell_type.as_deref()
    }

    /// Returns true for cell nodes.
    #[must_use]
    pub const fn is_cell(&self) -> bool {
        matches!(self.key, NodeKey::Cell { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cell_type {
            Some(cell_type) => write!(f, "{} ({cell_type})", self.key),
            None => write!(f, "{}", self.key),
        }
    }
}
