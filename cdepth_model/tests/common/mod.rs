#![allow(dead_code)]

use cdepth_dataset::{DepthSource, FeatureRow};

/// Rows whose label is exactly twice the fan-in, as for AND/OR/NAND/NOR cells.
pub fn doubled_fan_in_rows(count: u32) -> Vec<FeatureRow> {
    (0..count)
        .map(|i| {
            let fan_in = i % 6 + 1;
            FeatureRow {
                file: format!("design_{}.v", i % 7),
                signal: format!("$and$design.v:{i}"),
                fan_in,
                fan_out: fan_in + i % 5,
                gate_count: fan_in,
                logic_depth: Some(2 * fan_in),
                depth_source: DepthSource::Proxy,
            }
        })
        .collect()
}
