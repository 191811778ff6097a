use serde::{Deserialize, Serialize};

/// Which definition of depth a label carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthSource {
    /// Cheap fan-in based estimate assigned at extraction time.
    #[default]
    Proxy,
    /// Exact graph-search depth from the analyzer.
    Extracted,
}

impl std::fmt::Display for DepthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Proxy => write!(f, "proxy"),
            Self::Extracted => write!(f, "extracted"),
        }
    }
}

/// The model's input vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Features {
    /// Connection port count.
    pub fan_in: u32,
    /// Connected bit count across all ports.
    pub fan_out: u32,
    /// Same as fan-in.
    pub gate_count: u32,
}

impl Features {
    /// Number of features the model consumes.
    pub const LEN: usize = 3;

    /// Bundles the three feature values.
    #[must_use]
    pub const fn new(fan_in: u32, fan_out: u32, gate_count: u32) -> Self {
        Self {
            fan_in,
            fan_out,
            gate_count,
        }
    }

    /// Feature values in model column order.
    #[must_use]
    pub fn to_array(self) -> [f64; Self::LEN] {
        [
            f64::from(self.fan_in),
            f64::from(self.fan_out),
            f64::from(self.gate_count),
        ]
    }
}

/// One cell of one design, as a training or query sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Originating design source file.
    #[serde(rename = "File")]
    pub file: String,
    /// Cell name.
    #[serde(rename = "Signal")]
    pub signal: String,
    /// Number of connection ports on the cell.
    #[serde(rename = "Fan-in")]
    pub fan_in: u32,
    /// Number of connected bits across all ports.
    #[serde(rename = "Fan-out")]
    pub fan_out: u32,
    /// Gate count proxy, equal to fan-in.
    #[serde(rename = "Gate Count")]
    pub gate_count: u32,
    /// Depth label; absent in query-only datasets.
    #[serde(rename = "Logic Depth", default)]
    pub logic_depth: Option<u32>,
    /// Which definition `logic_depth` follows.
    #[serde(rename = "Depth Source", default)]
    pub depth_source: DepthSource,
}

impl FeatureRow {
    /// The row's model inputs.
    #[must_use]
    pub const fn features(&self) -> Features {
        Features::new(self.fan_in, self.fan_out, self.gate_count)
    }

    /// The label if it is a cheap proxy.
    #[must_use]
    pub fn proxy_depth(&self) -> Option<u32> {
        self.logic_depth
            .filter(|_| self.depth_source == DepthSource::Proxy)
    }

    /// The label if it came from graph search.
    #[must_use]
    pub fn extracted_depth(&self) -> Option<u32> {
        self.logic_depth
            .filter(|_| self.depth_source == DepthSource::Extracted)
    }

    /// Replaces the label with an exact graph-search depth.
    #[must_use]
    pub fn with_extracted_depth(self, depth: u32) -> Self {
        Self {
            logic_depth: Some(depth),
            depth_source: DepthSource::Extracted,
            ..self
        }
    }
}

/// Exact depth next to the model's estimate, for one signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Design source the signal belongs to.
    #[serde(rename = "RTL File")]
    pub rtl_file: String,
    /// Signal (cell) name.
    #[serde(rename = "Signal")]
    pub signal: String,
    /// Depth from graph search.
    #[serde(rename = "Extracted Depth")]
    pub extracted_depth: u32,
    /// Depth estimated by the model.
    #[serde(rename = "Predicted Depth")]
    pub predicted_depth: f64,
}
