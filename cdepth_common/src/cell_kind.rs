use std::fmt;
use std::fmt::Formatter;
use std::hash::Hash;

/// Strips the Yosys `$` / `_` decoration from a cell type and upper-cases it.
///
/// `$_AND_` and `$and` both become `AND`; `$_DFF_P_` becomes `DFF_P`.
#[must_use]
pub fn normalize_type_name(raw: &str) -> String {
    raw.trim_matches(|c| c == '$' || c == '_')
        .to_ascii_uppercase()
}

/// Type-name substrings that mark a flip-flop or register.
pub const SEQUENTIAL_MARKERS: [&str; 2] = ["FF", "REG"];

/// Returns true if any marker occurs in `raw`, ignoring case.
#[must_use]
pub fn has_type_marker<S: AsRef<str>>(raw: &str, markers: &[S]) -> bool {
    let upper = raw.to_ascii_uppercase();
    markers
        .iter()
        .any(|marker| upper.contains(&marker.as_ref().to_ascii_uppercase()))
}

/// Categorizes netlist primitives into the gate families the depth tooling cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    /// Buffer / Identity gate.
    Buf,
    /// Inverter gate.
    Not,
    /// Logical AND gate.
    And,
    /// Logical OR gate.
    Or,
    /// Logical XOR gate.
    Xor,
    /// Inverted AND gate.
    Nand,
    /// Inverted OR gate.
    Nor,
    /// Inverted XOR gate.
    Xnor,
    /// AND with one inverted input.
    AndNot,
    /// OR with one inverted input.
    OrNot,
    /// Multiplexer.
    Mux,
    /// AND-OR-Invert / OR-AND-Invert compound gates.
    Compound,
    /// Flip-flop or register.
    Dff,
    /// Level-sensitive latch.
    Latch,
    /// Other unmapped cell type.
    Other,
}

impl CellKind {
    /// Classifies a raw cell type string as written by Yosys.
    #[must_use]
    pub fn from_type_name(raw: &str) -> Self {
        let name = normalize_type_name(raw);
        match name.as_str() {
            "BUF" | "POS" => Self::Buf,
            "NOT" => Self::Not,
            "AND" => Self::And,
            "OR" => Self::Or,
            "XOR" => Self::Xor,
            "NAND" => Self::Nand,
            "NOR" => Self::Nor,
            "XNOR" => Self::Xnor,
            "ANDNOT" => Self::AndNot,
            "ORNOT" => Self::OrNot,
            "MUX" | "NMUX" | "PMUX" => Self::Mux,
            "AOI3" | "OAI3" | "AOI4" | "OAI4" => Self::Compound,
            _ if has_type_marker(&name, SEQUENTIAL_MARKERS.as_slice()) => Self::Dff,
            _ if name.contains("LATCH") => Self::Latch,
            _ => Self::Other,
        }
    }

    /// Gates whose proxy depth label is doubled during feature extraction.
    #[must_use]
    pub const fn doubles_proxy_depth(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Nand | Self::Nor)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
