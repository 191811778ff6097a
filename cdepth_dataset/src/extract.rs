use cdepth_common::Netlist;
use tracing::debug;

use crate::{DepthSource, FeatureRow};

/// One feature row per cell, in report order, labelled with the proxy depth.
///
/// Fan-in is the number of connection ports, fan-out the number of connected
/// bits across them, and gate count repeats fan-in. The proxy label doubles
/// fan-in for AND/OR/NAND/NOR cells and is fan-in otherwise. None of these
/// are textbook definitions; models are trained against exactly these.
#[must_use]
pub fn extract_features(netlist: &Netlist, file: &str) -> Vec<FeatureRow> {
    let rows: Vec<FeatureRow> = netlist
        .cells()
        .map(|(name, cell)| {
            let fan_in = cell.port_count() as u32;
            let fan_out = cell.connected_bit_count() as u32;
            let proxy_depth = if cell.kind().doubles_proxy_depth() {
                fan_in * 2
            } else {
                fan_in
            };

            FeatureRow {
                file: file.to_string(),
                signal: name.to_string(),
                fan_in,
                fan_out,
                gate_count: fan_in,
                logic_depth: Some(proxy_depth),
                depth_source: DepthSource::Proxy,
            }
        })
        .collect();

    debug!("extracted {} feature row(s) from {file}", rows.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdepth_common::{Cell, Module, PortDirection, SignalId};

    #[test]
    fn proxy_depth_doubles_for_and_family() {
        let module = Module::default()
            .with_cell(
                "g",
                Cell::new("$_NAND_")
                    .with_port("A", PortDirection::Input, [SignalId::Bit(1)])
                    .with_port("B", PortDirection::Input, [SignalId::Bit(2), SignalId::Bit(3)])
                    .with_port("Y", PortDirection::Output, [SignalId::Bit(4)]),
            )
            .with_cell(
                "x",
                Cell::new("$_XOR_")
                    .with_port("A", PortDirection::Input, [SignalId::Bit(1)])
                    .with_port("Y", PortDirection::Output, [SignalId::Bit(5)]),
            );
        let netlist = Netlist::from_modules([("m".to_string(), module)]);
        let rows = extract_features(&netlist, "alu.v");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].signal, "g");
        assert_eq!(rows[0].file, "alu.v");
        assert_eq!((rows[0].fan_in, rows[0].fan_out, rows[0].gate_count), (3, 4, 3));
        assert_eq!(rows[0].proxy_depth(), Some(6));
        assert_eq!(rows[0].extracted_depth(), None);
        assert_eq!(rows[1].proxy_depth(), Some(2));
    }
}
