//! Common types shared across the cdepth workspace.
//!
//! This crate owns the in-memory netlist model loaded from Yosys JSON reports,
//! the classification of cell types, and the synthesis collaborator that turns
//! RTL sources into those reports.

mod cell_kind;
mod netlist;
mod signal;
mod yosys;

pub use crate::cell_kind::*;
pub use crate::netlist::*;
pub use crate::signal::*;
pub use crate::yosys::*;
