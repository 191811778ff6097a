//! In-memory model of a synthesized Yosys JSON report.
//!
//! Loading is lenient: only the top-level `modules` key is mandatory, every
//! other map defaults to empty. Maps keep report order so that everything
//! derived from a netlist (feature rows, graph node numbering) is deterministic.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{CellKind, PortDirection, SignalId};

/// Failure to turn a report into a [`Netlist`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The report could not be opened or read.
    #[error("failed to read netlist report {}: {source}", path.display())]
    Io {
        /// Report location.
        path: PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },
    /// The report is not valid JSON or a map has the wrong shape.
    #[error("malformed netlist report {}: {source}", path.display())]
    Json {
        /// Report location.
        path: PathBuf,
        /// Underlying parse failure.
        source: serde_json::Error,
    },
    /// The report parsed but has no top-level `modules` key.
    #[error("netlist report {} has no `modules` key", path.display())]
    MissingModules {
        /// Report location.
        path: PathBuf,
    },
}

#[derive(Deserialize)]
struct RawNetlist {
    modules: Option<IndexMap<String, Module>>,
}

/// A synthesized design: module name to module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    modules: IndexMap<String, Module>,
}

/// One module of the design.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Module {
    /// Instantiated cells keyed by unique cell name.
    #[serde(default)]
    pub cells: IndexMap<String, Cell>,
    /// Module boundary ports.
    #[serde(default)]
    pub ports: IndexMap<String, ModulePort>,
    /// Named nets and the bits they cover.
    #[serde(default)]
    pub netnames: IndexMap<String, NetName>,
}

/// A module boundary port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModulePort {
    /// Raw direction string (`input`, `output`, `inout`).
    #[serde(default)]
    pub direction: String,
    /// Bits carried by the port.
    #[serde(default)]
    pub bits: Vec<SignalId>,
}

/// A named net.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NetName {
    /// Bits carried by the net.
    #[serde(default)]
    pub bits: Vec<SignalId>,
}

/// An instantiated primitive or register.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Cell {
    /// Raw cell type as written by synthesis (`$_AND_`, `$dff`, ...).
    #[serde(rename = "type")]
    pub cell_type: String,
    /// Port name to the ordered bits connected to it.
    #[serde(default)]
    pub connections: IndexMap<String, Vec<SignalId>>,
    /// Port name to raw direction string. Often partial or absent.
    #[serde(default)]
    pub port_directions: IndexMap<String, String>,
}

impl Cell {
    /// Creates a cell of the given type with no connections.
    #[must_use]
    pub fn new(cell_type: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            ..Self::default()
        }
    }

    /// Adds a connection with an explicit direction.
    #[must_use]
    pub fn with_port(
        mut self,
        port: &str,
        direction: PortDirection,
        bits: impl IntoIterator<Item = SignalId>,
    ) -> Self {
        self.connections
            .insert(port.to_string(), bits.into_iter().collect());
        if direction != PortDirection::Unknown {
            self.port_directions
                .insert(port.to_string(), direction.to_string());
        }
        self
    }

    /// Classification of this cell's type.
    #[must_use]
    pub fn kind(&self) -> CellKind {
        CellKind::from_type_name(&self.cell_type)
    }

    /// Direction of `port`, falling back to a pin-name guess when unrecorded.
    #[must_use]
    pub fn port_direction(&self, port: &str) -> PortDirection {
        match self.port_directions.get(port).map(|d| PortDirection::parse(d)) {
            Some(PortDirection::Unknown) | None => PortDirection::guess_from_port_name(port),
            Some(direction) => direction,
        }
    }

    /// Number of connection ports. This is the fan-in proxy.
    #[must_use]
    pub fn port_count(&self) -> usize {
        self.connections.len()
    }

    /// Total number of connected bits across all ports. This is the fan-out proxy.
    #[must_use]
    pub fn connected_bit_count(&self) -> usize {
        self.connections.values().map(Vec::len).sum()
    }
}

impl Module {
    /// Adds a cell, replacing any cell of the same name.
    #[must_use]
    pub fn with_cell(mut self, name: &str, cell: Cell) -> Self {
        self.cells.insert(name.to_string(), cell);
        self
    }

    /// Adds a named net.
    #[must_use]
    pub fn with_netname(mut self, name: &str, bits: impl IntoIterator<Item = SignalId>) -> Self {
        self.netnames.insert(
            name.to_string(),
            NetName {
                bits: bits.into_iter().collect(),
            },
        );
        self
    }
}

impl Netlist {
    /// Builds a netlist from already-constructed modules.
    #[must_use]
    pub fn from_modules(modules: impl IntoIterator<Item = (String, Module)>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
        }
    }

    /// Loads a Yosys JSON report from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let netlist = Self::from_reader(BufReader::new(file), path)?;
        debug!(
            "loaded {} module(s), {} cell(s) from {}",
            netlist.modules.len(),
            netlist.cell_count(),
            path.display()
        );
        Ok(netlist)
    }

    /// Parses a report from any reader. `origin` is only used in error messages.
    pub fn from_reader(reader: impl Read, origin: &Path) -> Result<Self, LoadError> {
        let raw: RawNetlist =
            serde_json::from_reader(reader).map_err(|source| LoadError::Json {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::from_raw(raw, origin)
    }

    /// Parses a report held in memory.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let origin = Path::new("<memory>");
        let raw: RawNetlist = serde_json::from_str(json).map_err(|source| LoadError::Json {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw, origin)
    }

    fn from_raw(raw: RawNetlist, origin: &Path) -> Result<Self, LoadError> {
        let modules = raw.modules.ok_or_else(|| LoadError::MissingModules {
            path: origin.to_path_buf(),
        })?;
        Ok(Self { modules })
    }

    /// Modules in report order.
    pub fn modules(&self) -> impl Iterator<Item = (&str, &Module)> {
        self.modules.iter().map(|(name, module)| (name.as_str(), module))
    }

    /// Looks up a module by name.
    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    /// Every cell of every module, in report order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.modules
            .values()
            .flat_map(|module| module.cells.iter().map(|(name, cell)| (name.as_str(), cell)))
    }

    /// Total number of cells across all modules.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.modules.values().map(|module| module.cells.len()).sum()
    }

    /// Number of modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}

/// How often each port name appears across all cells of a netlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortUsage {
    /// Port name to the number of cells connecting it.
    pub connected: IndexMap<String, usize>,
    /// Port name to the number of cells recording a direction for it.
    pub directed: IndexMap<String, usize>,
}

/// Tallies port-name usage over every cell, keyed by port name.
#[must_use]
pub fn port_usage(netlist: &Netlist) -> PortUsage {
    let mut usage = PortUsage::default();
    for (_, cell) in netlist.cells() {
        for port in cell.connections.keys() {
            *usage.connected.entry(port.clone()).or_default() += 1;
        }
        for port in cell.port_directions.keys() {
            *usage.directed.entry(port.clone()).or_default() += 1;
        }
    }
    usage
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "creator": "Yosys 0.40",
        "modules": {
            "top": {
                "ports": { "clk": { "direction": "input", "bits": [2] } },
                "cells": {
                    "$and$top.v:5$1": {
                        "hide_name": 1,
                        "type": "$_AND_",
                        "parameters": {},
                        "port_directions": { "A": "input", "B": "input", "Y": "output" },
                        "connections": { "A": [3], "B": [4], "Y": [5] }
                    },
                    "q_reg": {
                        "type": "$_DFF_P_",
                        "connections": { "C": [2], "D": [5], "Q": [6] }
                    }
                },
                "netnames": { "y": { "hide_name": 0, "bits": [5] } }
            }
        }
    }"#;

    #[test]
    fn parses_yosys_report() {
        let netlist = Netlist::from_json_str(REPORT).unwrap();
        assert_eq!(netlist.module_count(), 1);
        assert_eq!(netlist.cell_count(), 2);

        let names: Vec<_> = netlist.cells().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["$and$top.v:5$1", "q_reg"]);

        let module = netlist.module("top").unwrap();
        assert_eq!(module.netnames["y"].bits, vec![SignalId::Bit(5)]);
        assert_eq!(module.ports["clk"].direction, "input");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let netlist = Netlist::from_json_str(
            r#"{ "modules": { "m": { "cells": { "c": { "type": "$_NOT_" } } } } }"#,
        )
        .unwrap();
        let (_, cell) = netlist.cells().next().unwrap();
        assert!(cell.connections.is_empty());
        assert!(cell.port_directions.is_empty());
    }

    #[test]
    fn missing_modules_is_load_error() {
        let err = Netlist::from_json_str(r#"{ "creator": "Yosys" }"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingModules { .. }));
    }

    #[test]
    fn garbage_is_load_error() {
        let err = Netlist::from_json_str("not json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn absent_file_is_load_error() {
        let err = Netlist::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn port_direction_fallback() {
        let netlist = Netlist::from_json_str(REPORT).unwrap();
        let module = netlist.module("top").unwrap();
        let reg = &module.cells["q_reg"];
        assert_eq!(reg.port_direction("Q"), PortDirection::Output);
        assert_eq!(reg.port_direction("D"), PortDirection::Input);
        let and = &module.cells["$and$top.v:5$1"];
        assert_eq!(and.port_direction("Y"), PortDirection::Output);
    }

    #[test]
    fn counts_port_usage() {
        let netlist = Netlist::from_json_str(REPORT).unwrap();
        let usage = port_usage(&netlist);
        assert_eq!(usage.connected["A"], 1);
        assert_eq!(usage.connected.len(), 6);
        assert_eq!(usage.directed.len(), 3);
        assert!(!usage.directed.contains_key("Q"));
    }
}
