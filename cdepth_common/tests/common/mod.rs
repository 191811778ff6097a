#![allow(dead_code)]

use std::io::Write;

/// A small synthesized counter: two registers, an AND, a NOT and an XOR.
pub const COUNTER_REPORT: &str = r#"{
  "creator": "Yosys 0.40",
  "modules": {
    "counter": {
      "attributes": { "top": "00000000000000000000000000000001" },
      "ports": {
        "clk": { "direction": "input", "bits": [ 2 ] },
        "en": { "direction": "input", "bits": [ 3 ] },
        "q": { "direction": "output", "bits": [ 4, 5 ] }
      },
      "cells": {
        "$auto$ff.cc:266:slice$10": {
          "hide_name": 1,
          "type": "$_DFF_P_",
          "parameters": { },
          "port_directions": { "C": "input", "D": "input", "Q": "output" },
          "connections": { "C": [ 2 ], "D": [ 6 ], "Q": [ 4 ] }
        },
        "$auto$ff.cc:266:slice$11": {
          "hide_name": 1,
          "type": "$_DFF_P_",
          "port_directions": { "C": "input", "D": "input", "Q": "output" },
          "connections": { "C": [ 2 ], "D": [ 7 ], "Q": [ 5 ] }
        },
        "$abc$1$auto$blifparse.cc:396:parse_blif$12": {
          "hide_name": 1,
          "type": "$_XOR_",
          "port_directions": { "A": "input", "B": "input", "Y": "output" },
          "connections": { "A": [ 4 ], "B": [ 3 ], "Y": [ 6 ] }
        },
        "$abc$1$auto$blifparse.cc:396:parse_blif$13": {
          "hide_name": 1,
          "type": "$_AND_",
          "port_directions": { "A": "input", "B": "input", "Y": "output" },
          "connections": { "A": [ 4 ], "B": [ 3 ], "Y": [ 8 ] }
        },
        "$abc$1$auto$blifparse.cc:396:parse_blif$14": {
          "hide_name": 1,
          "type": "$_XOR_",
          "port_directions": { "A": "input", "B": "input", "Y": "output" },
          "connections": { "A": [ 8 ], "B": [ 5 ], "Y": [ 7 ] }
        }
      },
      "netnames": {
        "clk": { "hide_name": 0, "bits": [ 2 ] },
        "en": { "hide_name": 0, "bits": [ 3 ] },
        "q": { "hide_name": 0, "bits": [ 4, 5 ] }
      }
    }
  }
}"#;

/// Writes `contents` to a fresh temporary `.json` file.
pub fn write_report(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
