use std::collections::BTreeSet;

use cdepth_common::{SEQUENTIAL_MARKERS, has_type_marker, normalize_type_name};

use crate::Node;

/// Which path the analyzer measures between a sequential element and the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthMetric {
    /// One shortest path by edge count per starting register.
    #[default]
    ShortestPath,
    /// The path with the most depth-contributing gates that stays combinational.
    LongestPath,
}

/// Which cells start a path, which cells count, and how paths are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthRules {
    /// Case-insensitive substrings of the raw type that mark a sequential element.
    pub sequential_markers: Vec<String>,
    /// Normalized gate names that add one to a path's depth.
    pub contributing: BTreeSet<String>,
    /// Path selection.
    pub metric: DepthMetric,
}

impl Default for DepthRules {
    fn default() -> Self {
        Self {
            sequential_markers: SEQUENTIAL_MARKERS.map(String::from).to_vec(),
            contributing: ["AND", "OR", "NOT", "NAND", "XOR"]
                .into_iter()
                .map(String::from)
                .collect(),
            metric: DepthMetric::default(),
        }
    }
}

impl DepthRules {
    /// Rules with the default markers, the default gate set, and shortest-path selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gate name (normalized the same way as cell types) to the counted set.
    pub fn with_contributing(mut self, gate: &str) -> Self {
        self.contributing.insert(normalize_type_name(gate));
        self
    }

    /// Selects how paths are chosen.
    ///
    /// ```
    /// use cdepth_graph::{DepthMetric, DepthRules};
    ///
    /// let rules = DepthRules::new().with_metric(DepthMetric::LongestPath);
    /// assert_eq!(rules.metric, DepthMetric::LongestPath);
    /// ```
    #[must_use]
    pub fn with_metric(mut self, metric: DepthMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Returns true if a raw cell type names a flip-flop or register.
    #[must_use]
    pub fn is_sequential_type(&self, cell_type: &str) -> bool {
        has_type_marker(cell_type, self.sequential_markers.as_slice())
    }

    /// Returns true if a raw cell type adds to a path's depth.
    #[must_use]
    pub fn is_contributing_type(&self, cell_type: &str) -> bool {
        self.contributing.contains(&normalize_type_name(cell_type))
    }

    /// Returns true if `node` is a sequential cell. Nets never are.
    #[must_use]
    pub fn is_sequential(&self, node: &Node) -> bool {
        node.cell_type().is_some_and(|t| self.is_sequential_type(t))
    }

    /// Returns true if `node` is a depth-contributing cell. Nets never are.
    #[must_use]
    pub fn contributes(&self, node: &Node) -> bool {
        node.cell_type().is_some_and(|t| self.is_contributing_type(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdepth_common::CellKind;
    use rstest::rstest;

    #[rstest]
    #[case("$_DFF_P_", true)]
    #[case("$adff", true)]
    #[case("shift_reg", true)]
    #[case("$_AND_", false)]
    #[case("$dlatch", false)]
    fn sequential_markers(#[case] cell_type: &str, #[case] expected: bool) {
        assert_eq!(DepthRules::default().is_sequential_type(cell_type), expected);
    }

    #[rstest]
    #[case("$_DFF_P_")]
    #[case("$_DFFE_PN0P_")]
    #[case("$adff")]
    #[case("shift_reg")]
    #[case("$_AND_")]
    #[case("$_DLATCH_P_")]
    #[case("$add")]
    fn default_markers_agree_with_cell_kind(#[case] cell_type: &str) {
        assert_eq!(
            DepthRules::default().is_sequential_type(cell_type),
            CellKind::from_type_name(cell_type) == CellKind::Dff
        );
    }

    #[rstest]
    #[case("AND", true)]
    #[case("$_AND_", true)]
    #[case("$_NOT_", true)]
    #[case("$_XOR_", true)]
    #[case("$_NOR_", false)]
    #[case("$_MUX_", false)]
    fn contributing_gates(#[case] cell_type: &str, #[case] expected: bool) {
        assert_eq!(DepthRules::default().is_contributing_type(cell_type), expected);
    }

    #[test]
    fn contributing_set_is_extendable() {
        let rules = DepthRules::new().with_contributing("$_MUX_");
        assert!(rules.is_contributing_type("$_MUX_"));
        assert!(rules.is_contributing_type("MUX"));
    }
}
