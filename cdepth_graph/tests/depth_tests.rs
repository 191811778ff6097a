#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use cdepth_common::{Cell, Module, Netlist};
use cdepth_graph::{
    DepthAnalyzer, DepthError, DepthMetric, DepthRules, LogicGraph, combinational_depth,
};
use rstest::rstest;

mod common;
use common::{dff, gate1, gate2, single_module};

lazy_static::lazy_static! {
    /// r drives an AND directly.
    static ref REG_AND: Netlist = single_module(
        Module::default()
            .with_cell("r", dff(9, 2))
            .with_cell("g", gate2("AND", 2, 5, 3))
            .with_netname("y", [cdepth_common::SignalId::Bit(3)])
    );

    /// Two routes from r to t: a short one through one OR, and a long one
    /// through AND, NOT, XOR before the same OR.
    static ref DIAMOND: Netlist = single_module(
        Module::default()
            .with_cell("r", dff(9, 2))
            .with_cell("a", gate2("$_AND_", 2, 5, 3))
            .with_cell("n", gate1("$_NOT_", 3, 4))
            .with_cell("x", gate2("$_XOR_", 4, 5, 6))
            .with_cell("t", gate2("$_OR_", 2, 6, 7))
    );

    /// r1 -> NOT -> r2, with r2's output named q2.
    static ref REG_NOT_REG: Netlist = single_module(
        Module::default()
            .with_cell("r1", dff(9, 2))
            .with_cell("n", gate1("$_NOT_", 2, 3))
            .with_cell("r2", dff(3, 4))
            .with_netname("q2", [cdepth_common::SignalId::Bit(4)])
    );

    /// r1 -> AND -> r2 -> NOT -> t.
    static ref TWO_STAGES: Netlist = single_module(
        Module::default()
            .with_cell("r1", dff(9, 2))
            .with_cell("a", gate2("$_AND_", 2, 5, 3))
            .with_cell("r2", dff(3, 4))
            .with_cell("t", gate1("$_NOT_", 4, 6))
    );

    /// Combinational ring between two gates, fed by a register.
    static ref RING: Netlist = single_module(
        Module::default()
            .with_cell("r", dff(9, 2))
            .with_cell("a", gate2("$_AND_", 2, 4, 3))
            .with_cell("b", gate1("$_NOT_", 3, 4))
    );
}

fn depth(netlist: &Netlist, metric: DepthMetric, signal: &str) -> Result<u32, DepthError> {
    let graph = LogicGraph::build(netlist);
    combinational_depth(&graph, DepthRules::new().with_metric(metric), signal).map(|r| r.depth)
}

#[rstest]
#[case::gate_cell("g", 1)]
#[case::gate_output_bit("3", 1)]
#[case::gate_output_name("y", 1)]
#[case::register_itself("r", 0)]
#[case::register_output_net("2", 0)]
#[case::unknown_signal("missing", 0)]
fn test_register_feeding_and(#[case] signal: &str, #[case] expected: u32) {
    for metric in [DepthMetric::ShortestPath, DepthMetric::LongestPath] {
        assert_eq!(depth(&REG_AND, metric, signal).unwrap(), expected, "{metric:?}");
    }
}

#[test]
fn test_register_feeding_and_path() {
    let graph = LogicGraph::build(&REG_AND);
    let analyzer = DepthAnalyzer::new(&graph, DepthRules::default()).unwrap();
    let report = analyzer.depth_of_signal("g").unwrap();
    assert_eq!(report.reachable_sources, 1);
    let names: Vec<String> = report
        .path
        .iter()
        .map(|idx| graph.node(*idx).key().to_string())
        .collect();
    assert_eq!(names, vec!["r", "net 2", "g"]);
}

#[test]
fn test_no_sequential_elements() {
    let netlist = single_module(Module::default().with_cell("g", gate2("AND", 1, 2, 3)));
    let graph = LogicGraph::build(&netlist);
    assert_eq!(
        DepthAnalyzer::new(&graph, DepthRules::default()).unwrap_err(),
        DepthError::NoSequentialElements
    );
    assert_eq!(
        depth(&netlist, DepthMetric::ShortestPath, "g"),
        Err(DepthError::NoSequentialElements)
    );
}

#[test]
fn test_unreachable_target_is_zero() {
    let netlist = single_module(
        Module::default()
            .with_cell("r", dff(9, 2))
            .with_cell("g", gate2("AND", 5, 6, 3)),
    );
    let graph = LogicGraph::build(&netlist);
    let analyzer = DepthAnalyzer::new(&graph, DepthRules::default()).unwrap();
    let report = analyzer.depth_of_signal("g").unwrap();
    assert_eq!(report.depth, 0);
    assert!(!report.has_path());
    assert_eq!(report.reachable_sources, 0);
}

#[rstest]
#[case(DepthMetric::ShortestPath, 1)]
#[case(DepthMetric::LongestPath, 4)]
fn test_metric_choice(#[case] metric: DepthMetric, #[case] expected: u32) {
    assert_eq!(depth(&DIAMOND, metric, "t").unwrap(), expected);
}

#[test]
fn test_extended_contributing_set() {
    let netlist = single_module(
        Module::default()
            .with_cell("r", dff(9, 2))
            .with_cell("m", gate2("$_MUX_", 2, 2, 3))
            .with_cell("g", gate1("$_NOT_", 3, 4)),
    );
    let graph = LogicGraph::build(&netlist);
    let plain = combinational_depth(&graph, DepthRules::default(), "g").unwrap();
    let extended =
        combinational_depth(&graph, DepthRules::new().with_contributing("MUX"), "g").unwrap();
    assert_eq!(plain.depth, 1);
    assert_eq!(extended.depth, 2);
}

#[test]
fn test_combinational_loop() {
    assert_eq!(depth(&RING, DepthMetric::ShortestPath, "b").unwrap(), 2);
    assert!(matches!(
        depth(&RING, DepthMetric::LongestPath, "b"),
        Err(DepthError::CombinationalLoop { .. })
    ));
}

#[test]
fn test_register_feedback_is_not_a_loop() {
    // r -> NOT -> r.D is the classic toggle flop.
    let netlist = single_module(
        Module::default()
            .with_cell("r", dff(3, 2))
            .with_cell("n", gate1("$_NOT_", 2, 3)),
    );
    assert_eq!(depth(&netlist, DepthMetric::LongestPath, "n").unwrap(), 1);
    assert_eq!(depth(&netlist, DepthMetric::ShortestPath, "n").unwrap(), 1);
}

#[rstest]
#[case::driven_register_output_name(&*REG_NOT_REG, "q2", 0)]
#[case::driven_register_output_bit(&*REG_NOT_REG, "4", 0)]
#[case::driven_register_input(&*REG_NOT_REG, "n", 1)]
#[case::second_stage_gate(&*TWO_STAGES, "t", 1)]
#[case::second_stage_output(&*TWO_STAGES, "6", 1)]
#[case::first_stage_gate(&*TWO_STAGES, "a", 1)]
fn test_registers_cut_paths(
    #[case] netlist: &Netlist,
    #[case] signal: &str,
    #[case] expected: u32,
) {
    for metric in [DepthMetric::ShortestPath, DepthMetric::LongestPath] {
        assert_eq!(depth(netlist, metric, signal).unwrap(), expected, "{metric:?}");
    }
}

#[rstest]
#[case(DepthMetric::ShortestPath)]
#[case(DepthMetric::LongestPath)]
fn test_path_starts_at_nearest_register(#[case] metric: DepthMetric) {
    let graph = LogicGraph::build(&TWO_STAGES);
    let analyzer = DepthAnalyzer::new(&graph, DepthRules::new().with_metric(metric)).unwrap();
    let report = analyzer.depth_of_signal("t").unwrap();
    assert_eq!(report.reachable_sources, 1);
    let names: Vec<String> = report
        .path
        .iter()
        .map(|idx| graph.node(*idx).key().to_string())
        .collect();
    assert_eq!(names, vec!["r2", "net 4", "t"]);
}

#[test]
fn test_missing_directions_fall_back_to_pin_names() {
    let reg = Cell::new("$dff");
    let reg = Cell {
        connections: [
            ("D".to_string(), vec![cdepth_common::SignalId::Bit(8)]),
            ("Q".to_string(), vec![cdepth_common::SignalId::Bit(2)]),
        ]
        .into_iter()
        .collect(),
        ..reg
    };
    let and = Cell {
        connections: [
            ("A".to_string(), vec![cdepth_common::SignalId::Bit(2)]),
            ("Y".to_string(), vec![cdepth_common::SignalId::Bit(3)]),
        ]
        .into_iter()
        .collect(),
        ..Cell::new("$and")
    };
    let netlist = single_module(Module::default().with_cell("r", reg).with_cell("g", and));
    assert_eq!(depth(&netlist, DepthMetric::ShortestPath, "3").unwrap(), 1);
}

#[test]
fn test_analyzer_is_repeatable() {
    let graph = LogicGraph::build(&DIAMOND);
    let analyzer = DepthAnalyzer::new(&graph, DepthRules::default()).unwrap();
    let first = analyzer.depth_of_signal("t").unwrap();
    let second = analyzer.depth_of_signal("t").unwrap();
    assert_eq!(first, second);
    assert_eq!(analyzer.sequential_elements().len(), 1);
}
