//! Signal identifiers and port directions as they appear in Yosys JSON.
//!
//! A connection endpoint is either a numbered net bit or a constant driver
//! (`"0"`, `"1"`, `"x"`, `"z"`). Both are opaque tokens to the rest of the
//! pipeline; they only need to compare and hash consistently.

use serde::{Deserialize, Serialize};

/// A single bit endpoint of a cell connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalId {
    /// A numbered net bit.
    Bit(u64),
    /// A constant or otherwise non-numeric endpoint.
    Const(String),
}

impl SignalId {
    /// Parses a user-supplied identifier. Digits become bits, anything else a constant.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        token
            .parse::<u64>()
            .map_or_else(|_| Self::Const(token.to_string()), Self::Bit)
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bit(bit) => write!(f, "{bit}"),
            Self::Const(value) => write!(f, "{value}"),
        }
    }
}

impl From<u64> for SignalId {
    fn from(bit: u64) -> Self {
        Self::Bit(bit)
    }
}

/// Direction of a cell or module port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PortDirection {
    /// Direction not recorded in the report.
    #[default]
    Unknown,
    /// Input port (receives signal).
    Input,
    /// Output port (drives signal).
    Output,
    /// Bidirectional port.
    Inout,
}

impl PortDirection {
    /// Parses the direction strings Yosys writes. Anything unrecognized is `Unknown`.
    #[must_use]
    pub fn parse(direction: &str) -> Self {
        match direction.to_ascii_lowercase().as_str() {
            "input" => Self::Input,
            "output" => Self::Output,
            "inout" => Self::Inout,
            _ => Self::Unknown,
        }
    }

    /// Fallback used when a cell carries no direction for a port.
    ///
    /// Matches the output pin names of the Yosys internal cell library.
    #[must_use]
    pub fn guess_from_port_name(port: &str) -> Self {
        match port.to_ascii_uppercase().as_str() {
            "Y" | "Q" | "QN" | "O" | "Z" => Self::Output,
            _ => Self::Input,
        }
    }

    /// Returns true if signals flow out of the cell through this port.
    #[must_use]
    pub const fn drives(self) -> bool {
        matches!(self, Self::Output)
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Inout => write!(f, "inout"),
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn prop_bit_display_roundtrips(bit: u64) -> bool {
            SignalId::parse(&SignalId::Bit(bit).to_string()) == SignalId::Bit(bit)
        }
    }
}
