#![allow(dead_code)]

use cdepth_common::{Cell, Module, Netlist, PortDirection, SignalId};
use quickcheck::{Arbitrary, Gen};

/// Shorthand for a single-bit connection list.
pub fn bit(n: u64) -> [SignalId; 1] {
    [SignalId::Bit(n)]
}

/// A flip-flop reading `d` and driving `q`.
pub fn dff(d: u64, q: u64) -> Cell {
    Cell::new("$_DFF_P_")
        .with_port("C", PortDirection::Input, bit(1))
        .with_port("D", PortDirection::Input, bit(d))
        .with_port("Q", PortDirection::Output, bit(q))
}

/// A two-input gate.
pub fn gate2(cell_type: &str, a: u64, b: u64, y: u64) -> Cell {
    Cell::new(cell_type)
        .with_port("A", PortDirection::Input, bit(a))
        .with_port("B", PortDirection::Input, bit(b))
        .with_port("Y", PortDirection::Output, bit(y))
}

/// A one-input gate.
pub fn gate1(cell_type: &str, a: u64, y: u64) -> Cell {
    Cell::new(cell_type)
        .with_port("A", PortDirection::Input, bit(a))
        .with_port("Y", PortDirection::Output, bit(y))
}

/// Wraps one module into a netlist.
pub fn single_module(module: Module) -> Netlist {
    Netlist::from_modules([("top".to_string(), module)])
}

/// Random single-module netlists over a small pool of bits, so that paths form.
#[derive(Clone, Debug)]
pub struct ArbitraryNetlist(pub Netlist);

impl Arbitrary for ArbitraryNetlist {
    fn arbitrary(g: &mut Gen) -> Self {
        let types = [
            "$_AND_", "$_OR_", "$_NOT_", "$_XOR_", "$_NAND_", "$_NOR_", "$_MUX_", "$_DFF_P_",
            "$add",
        ];
        let ports = ["A", "B", "S", "D", "Y", "Q"];
        let directions = [
            PortDirection::Input,
            PortDirection::Output,
            PortDirection::Unknown,
        ];

        let cell_count = usize::arbitrary(g) % 12;
        let mut module = Module::default();
        for i in 0..cell_count {
            let mut cell = Cell::new(*g.choose(&types).unwrap());
            let port_count = usize::arbitrary(g) % 4;
            for _ in 0..port_count {
                let width = usize::arbitrary(g) % 3 + 1;
                let bits: Vec<SignalId> = (0..width)
                    .map(|_| SignalId::Bit(u64::arbitrary(g) % 10))
                    .collect();
                cell = cell.with_port(g.choose(&ports).unwrap(), *g.choose(&directions).unwrap(), bits);
            }
            module = module.with_cell(&format!("c{i}"), cell);
        }
        Self(single_module(module))
    }
}
