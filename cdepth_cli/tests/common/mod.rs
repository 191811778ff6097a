#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use cdepth_common::{SynthError, SynthReport, Synthesizer};

/// A register feeding an AND gate feeding an inverter that loops back into the register.
pub const ALU_REPORT: &str = r#"{
  "creator": "Yosys 0.40",
  "modules": {
    "alu": {
      "attributes": { "top": "00000000000000000000000000000001" },
      "ports": {
        "clk": { "direction": "input", "bits": [ 1 ] },
        "en": { "direction": "input", "bits": [ 5 ] },
        "out": { "direction": "output", "bits": [ 4 ] }
      },
      "cells": {
        "r": {
          "hide_name": 0,
          "type": "$_DFF_P_",
          "parameters": {},
          "attributes": {},
          "port_directions": { "C": "input", "D": "input", "Q": "output" },
          "connections": { "C": [ 1 ], "D": [ 4 ], "Q": [ 2 ] }
        },
        "g": {
          "hide_name": 0,
          "type": "$_AND_",
          "parameters": {},
          "attributes": {},
          "port_directions": { "A": "input", "B": "input", "Y": "output" },
          "connections": { "A": [ 2 ], "B": [ 5 ], "Y": [ 3 ] }
        },
        "n": {
          "hide_name": 0,
          "type": "$_NOT_",
          "parameters": {},
          "attributes": {},
          "port_directions": { "A": "input", "Y": "output" },
          "connections": { "A": [ 3 ], "Y": [ 4 ] }
        }
      },
      "netnames": {
        "q": { "hide_name": 0, "bits": [ 2 ], "attributes": {} },
        "out": { "hide_name": 0, "bits": [ 4 ], "attributes": {} }
      }
    }
  }
}"#;

/// One XOR gate and no registers.
pub const COMB_REPORT: &str = r#"{
  "creator": "Yosys 0.40",
  "modules": {
    "comb": {
      "ports": {},
      "cells": {
        "x": {
          "hide_name": 0,
          "type": "$_XOR_",
          "parameters": {},
          "attributes": {},
          "port_directions": { "A": "input", "B": "input", "Y": "output" },
          "connections": { "A": [ 2 ], "B": [ 3 ], "Y": [ 4 ] }
        }
      },
      "netnames": {}
    }
  }
}"#;

/// Serves canned reports by source file name; anything else fails like a yosys error.
#[derive(Default)]
pub struct FakeSynthesizer {
    reports: HashMap<String, &'static str>,
    calls: AtomicUsize,
}

impl FakeSynthesizer {
    pub fn new() -> Self {
        Self::default()
            .with_report("alu.v", ALU_REPORT)
            .with_report("comb.v", COMB_REPORT)
    }

    pub fn with_report(mut self, file: &str, report: &'static str) -> Self {
        self.reports.insert(file.to_string(), report);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Synthesizer for FakeSynthesizer {
    fn synthesize(&self, source: &Path) -> Result<SynthReport, SynthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(report) = self.reports.get(&name) else {
            return Err(SynthError::Failed {
                status: "exit status: 1".to_string(),
                stderr: format!("ERROR: Can't open input file `{name}' for reading"),
            });
        };

        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(report.as_bytes())?;
        Ok(SynthReport::temporary(file.into_temp_path()))
    }
}
