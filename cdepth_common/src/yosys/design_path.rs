//! Handling of design file paths and types.

use std::path::{Path, PathBuf};

/// Represents a path to a design file, categorized by its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DesignPath {
    /// A Verilog file (.v).
    Verilog(PathBuf),
    /// A SystemVerilog file (.sv).
    SystemVerilog(PathBuf),
    /// An RTLIL file (.il).
    Rtlil(PathBuf),
    /// An already synthesized JSON report (.json).
    Json(PathBuf),
}

impl DesignPath {
    /// Categorizes `path` by extension.
    pub fn new(path: PathBuf) -> Result<Self, String> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("v") => Ok(Self::Verilog(path)),
            Some("sv") => Ok(Self::SystemVerilog(path)),
            Some("il") => Ok(Self::Rtlil(path)),
            Some("json") => Ok(Self::Json(path)),
            _ => Err(format!(
                "Unsupported design file extension: {:?}",
                path.extension()
            )),
        }
    }

    /// Returns true if `path` names an RTL source the batch drivers should pick up.
    #[must_use]
    pub fn is_rtl_source(path: &Path) -> bool {
        matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("v" | "sv")
        )
    }

    /// The wrapped path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Verilog(p) | Self::SystemVerilog(p) | Self::Rtlil(p) | Self::Json(p) => p,
        }
    }

    /// The Yosys frontend command that reads this kind of file.
    #[must_use]
    pub const fn read_command(&self) -> &'static str {
        match self {
            Self::Verilog(_) => "read_verilog",
            Self::SystemVerilog(_) => "read_verilog -sv",
            Self::Rtlil(_) => "read_rtlil",
            Self::Json(_) => "read_json",
        }
    }

    /// Returns true if the file is already a synthesized report.
    #[must_use]
    pub const fn is_report(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}
