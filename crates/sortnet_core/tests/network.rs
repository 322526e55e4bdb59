// Tests for building and draining networks.

use proptest::prelude::*;
use sortnet_core::error::{AlreadyWired, KindConflict, NotReady, Overfull};
use sortnet_core::{Drained, Error, Goal, Id, Instruction, Kind, Network, Receive, instr, root};
use std::collections::BTreeSet;

// The worked example from the puzzle description.
//
//    value 5 ---> bot 2 <--- value 2
//                 |   |
//             low |   | high
//                 v   |
//    value 3 -> bot 1 |
//               |  |  |
//           low |  |  |
//               |  |high
//               v  v  v
//         output 1 bot 0
//                  |   |
//              low |   | high
//                  v   v
//           output 2   output 0
const EXAMPLE: &str = "\
value 5 goes to bot 2
bot 2 gives low to bot 1 and high to bot 0
value 3 goes to bot 1
bot 1 gives low to output 1 and high to bot 0
bot 0 gives low to output 2 and high to output 0
value 2 goes to bot 2
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(text: &str, goal: Goal) -> Result<Network, Error> {
    let mut net = Network::new(goal);
    net.apply_all(instr::parse_lines(text)?)?;
    Ok(net)
}

fn run(text: &str, goal: Goal) -> Result<Drained, Error> {
    build(text, goal)?.drain()
}

#[test]
fn test_single_comparator() {
    init_logging();
    let text = "\
value 5 goes to bot 2
value 3 goes to bot 2
bot 2 gives low to output 0 and high to output 1";
    let drained = run(text, Goal::new(3, 5)).unwrap();
    assert_eq!(drained.goal_match(), Some(Id::bot(2)));
    assert_eq!(drained.sink(Id::output(0)), Some(&[3][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[5][..]));
    assert_eq!(drained.processed(), 1);
    assert!(drained.stranded().is_empty());
}

#[test]
fn test_wiring_creates_comparator_before_assignment() {
    init_logging();
    let mut net = Network::new(Goal::new(1, 2));
    net.apply("bot 7 gives low to output 0 and high to output 1".parse().unwrap())
        .unwrap();
    let ix = net.registry().index_of(Id::bot(7)).unwrap();
    assert_eq!(net.registry().len(), 3);

    net.apply("value 2 goes to bot 7".parse().unwrap()).unwrap();
    net.apply("value 1 goes to bot 7".parse().unwrap()).unwrap();
    assert_eq!(net.registry().index_of(Id::bot(7)), Some(ix));
    assert_eq!(net.registry().len(), 3);
    assert_eq!(net.registry().node(ix).unwrap().values(), &[2, 1]);

    let drained = net.drain().unwrap();
    assert_eq!(drained.goal_match(), Some(Id::bot(7)));
    assert_eq!(drained.sink(Id::output(0)), Some(&[1][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[2][..]));
}

// bot 0 feeds bot 1 and bot 2, each of which holds one assigned value. Only
// bot 0 is a root, so the flush from bot 0 alone must reach every sink.
#[test]
fn test_cascade_through_chain() {
    init_logging();
    let text = "\
bot 0 gives low to bot 1 and high to bot 2
bot 1 gives low to output 0 and high to output 1
bot 2 gives low to output 2 and high to output 3
value 10 goes to bot 1
value 40 goes to bot 2
value 30 goes to bot 0
value 20 goes to bot 0";
    let net = build(text, Goal::new(20, 30)).unwrap();
    let roots: Vec<_> = root::roots(net.registry())
        .into_iter()
        .map(|ix| net.registry().node(ix).unwrap().id())
        .collect();
    assert_eq!(roots, vec![Id::bot(0)]);

    let drained = net.drain().unwrap();
    assert_eq!(drained.goal_match(), Some(Id::bot(0)));
    assert_eq!(drained.processed(), 3);
    assert_eq!(drained.sink(Id::output(0)), Some(&[10][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[20][..]));
    assert_eq!(drained.sink(Id::output(2)), Some(&[30][..]));
    assert_eq!(drained.sink(Id::output(3)), Some(&[40][..]));
    assert!(drained.stranded().is_empty());
}

// With only bot 0 fed, its targets each receive a single value and wait.
#[test]
fn test_incomplete_input_leaves_stranded_comparators() {
    init_logging();
    let text = "\
bot 0 gives low to bot 1 and high to bot 2
bot 1 gives low to output 0 and high to output 1
bot 2 gives low to output 2 and high to output 3
value 30 goes to bot 0
value 20 goes to bot 0";
    let drained = run(text, Goal::new(20, 30)).unwrap();
    assert_eq!(drained.processed(), 1);
    assert_eq!(drained.stranded(), vec![Id::bot(1), Id::bot(2)]);
    let reg = drained.registry();
    assert_eq!(reg.get(Id::bot(1)).unwrap().values(), &[20]);
    assert_eq!(reg.get(Id::bot(2)).unwrap().values(), &[30]);
    assert_eq!(drained.sink(Id::output(0)), Some(&[][..]));
}

#[test]
fn test_puzzle_example() {
    init_logging();
    let drained = run(EXAMPLE, Goal::new(5, 2)).unwrap();
    assert_eq!(drained.goal_match(), Some(Id::bot(2)));
    assert_eq!(drained.matches(), &[Id::bot(2)]);
    assert_eq!(drained.sink(Id::output(0)), Some(&[5][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[2][..]));
    assert_eq!(drained.sink(Id::output(2)), Some(&[3][..]));
    assert_eq!(drained.processed(), 3);
    assert!(drained.stranded().is_empty());
}

#[test]
fn test_no_goal_match() {
    let drained = run(EXAMPLE, Goal::new(1, 99)).unwrap();
    assert_eq!(drained.goal_match(), None);
    assert!(drained.matches().is_empty());
}

#[test]
fn test_roots_are_exactly_the_directly_fed_comparators() {
    let net = build(EXAMPLE, Goal::new(2, 5)).unwrap();
    let reg = net.registry();

    // Only bot 2 receives all of its values by assignment.
    let roots: BTreeSet<Id> = root::roots(reg)
        .into_iter()
        .map(|ix| reg.node(ix).unwrap().id())
        .collect();
    assert_eq!(roots, BTreeSet::from([Id::bot(2)]));

    for (ix, c) in reg.comparators() {
        let assigned_all = c.held().len() == 2;
        assert_eq!(reg.has_parents(ix), !assigned_all, "{}", c.id());
    }

    let bot0 = reg.index_of(Id::bot(0)).unwrap();
    assert_eq!(reg.parents(bot0), BTreeSet::from([Id::bot(1), Id::bot(2)]));
}

#[test]
fn test_drain_is_idempotent() {
    let a = run(EXAMPLE, Goal::new(2, 5)).unwrap().report();
    let b = run(EXAMPLE, Goal::new(2, 5)).unwrap().report();
    assert_eq!(a, b);
    let json_a = serde_json::to_string(&a).unwrap();
    let json_b = serde_json::to_string(&b).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn test_report_contents() {
    let report = run(EXAMPLE, Goal::new(2, 5)).unwrap().report();
    assert_eq!(report.matches, vec![Id::bot(2)]);
    assert_eq!(report.processed, 3);
    let sinks: Vec<_> = report
        .sinks
        .iter()
        .map(|s| (s.id, s.values.clone()))
        .collect();
    // Sinks appear in the order they were first referenced.
    assert_eq!(
        sinks,
        vec![
            (Id::output(1), vec![2]),
            (Id::output(2), vec![3]),
            (Id::output(0), vec![5]),
        ]
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["matches"][0]["space"], "bot");
    assert_eq!(json["matches"][0]["index"], 2);
}

#[test]
fn test_equal_values_reach_both_targets() {
    let text = "\
value 4 goes to bot 0
value 4 goes to bot 0
bot 0 gives low to output 0 and high to output 1";
    let drained = run(text, Goal::new(4, 4)).unwrap();
    assert_eq!(drained.goal_match(), Some(Id::bot(0)));
    assert_eq!(drained.sink(Id::output(0)), Some(&[4][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[4][..]));
}

#[test]
fn test_sink_collects_multiple_values() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0
value 3 goes to bot 1
value 4 goes to bot 1
bot 0 gives low to output 0 and high to output 1
bot 1 gives low to output 0 and high to output 1";
    let drained = run(text, Goal::new(0, 0)).unwrap();
    assert_eq!(drained.sink(Id::output(0)), Some(&[1, 3][..]));
    assert_eq!(drained.sink(Id::output(1)), Some(&[2, 4][..]));
    assert_eq!(drained.sink(Id::bot(0)), None);
    assert_eq!(drained.sink(Id::output(9)), None);
}

#[test]
fn test_assigning_to_a_sink_is_a_kind_conflict() {
    let mut net = build(
        "bot 0 gives low to output 1 and high to output 2",
        Goal::new(1, 2),
    )
    .unwrap();
    let err = net.apply(Instruction::assign(Id::output(1), 4)).unwrap_err();
    assert_eq!(
        err,
        Error::KindConflict(KindConflict {
            id: Id::output(1),
            existing: Kind::Sink,
            requested: Kind::Comparator,
        })
    );
}

#[test]
fn test_wiring_a_comparator_as_a_sink_is_a_kind_conflict() {
    let mut net = build("value 1 goes to bot 3", Goal::new(1, 2)).unwrap();
    let err = net
        .apply_wire(Id::bot(0), Id::bot(3), Kind::Sink, Id::output(0), Kind::Sink)
        .unwrap_err();
    assert!(matches!(err, Error::KindConflict(KindConflict { id, .. }) if id == Id::bot(3)));
}

#[test]
fn test_rewiring_fails() {
    let text = "\
bot 0 gives low to output 0 and high to output 1
bot 0 gives low to output 1 and high to output 0";
    let err = build(text, Goal::new(1, 2)).unwrap_err();
    assert_eq!(err, Error::AlreadyWired(AlreadyWired { id: Id::bot(0) }));
}

#[test]
fn test_third_assignment_is_overfull() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0
value 3 goes to bot 0";
    let err = build(text, Goal::new(1, 2)).unwrap_err();
    assert_eq!(err, Error::Overfull(Overfull { id: Id::bot(0), value: 3 }));
}

// bot 1 is fully assigned, but bot 0 also routes into it.
#[test]
fn test_overfull_while_draining() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0
value 3 goes to bot 1
value 4 goes to bot 1
bot 0 gives low to bot 1 and high to output 0
bot 1 gives low to output 1 and high to output 2";
    let err = run(text, Goal::new(1, 2)).unwrap_err();
    assert_eq!(err, Error::Overfull(Overfull { id: Id::bot(1), value: 1 }));
}

#[test]
fn test_root_missing_a_value_is_not_ready() {
    let text = "\
value 1 goes to bot 0
bot 0 gives low to output 0 and high to output 1";
    let err = run(text, Goal::new(1, 2)).unwrap_err();
    assert_eq!(
        err,
        Error::NotReady(NotReady {
            id: Id::bot(0),
            held: 1,
            wired: true,
        })
    );
}

#[test]
fn test_unwired_root_is_not_ready() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0";
    let err = run(text, Goal::new(1, 2)).unwrap_err();
    assert_eq!(
        err,
        Error::NotReady(NotReady {
            id: Id::bot(0),
            held: 2,
            wired: false,
        })
    );
}

#[test]
fn test_cycle_is_detected() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0
bot 0 gives low to bot 1 and high to output 0
bot 1 gives low to bot 0 and high to output 1";
    let err = run(text, Goal::new(1, 2)).unwrap_err();
    match err {
        Error::CycleDetected(cycle) => {
            assert!([Id::bot(0), Id::bot(1)].contains(&cycle.id));
        }
        err => panic!("expected a cycle, found {err:?}"),
    }
}

#[test]
fn test_parse_error_precedes_mutation() {
    let text = "\
value 1 goes to bot 0
value 2 goes to bot 0
value 3 goes to bot 0
bot 0 gives low to the floor";
    // The malformed final line is reported rather than the overfull bot.
    let err = run(text, Goal::new(1, 2)).unwrap_err();
    match err {
        Error::Parse(err) => assert_eq!(err.line, 4),
        err => panic!("expected a parse error, found {err:?}"),
    }
}

#[test]
fn test_empty_input() {
    let drained = run("", Goal::new(1, 2)).unwrap();
    assert_eq!(drained.goal_match(), None);
    assert_eq!(drained.processed(), 0);
    assert_eq!(drained.registry().len(), 0);
}

proptest! {
    #[test]
    fn prop_low_receives_min_high_receives_max(a in any::<u64>(), b in any::<u64>()) {
        let mut net = Network::new(Goal::new(a, b));
        net.apply(Instruction::assign(Id::bot(0), a)).unwrap();
        net.apply(Instruction::assign(Id::bot(0), b)).unwrap();
        net.apply(Instruction::wire(Id::bot(0), Id::output(0), Id::output(1))).unwrap();
        let drained = net.drain().unwrap();
        prop_assert_eq!(drained.sink(Id::output(0)), Some(&[a.min(b)][..]));
        prop_assert_eq!(drained.sink(Id::output(1)), Some(&[a.max(b)][..]));
        prop_assert_eq!(drained.goal_match(), Some(Id::bot(0)));
    }

    #[test]
    fn prop_instruction_order_does_not_change_result(
        instrs in Just(instr::parse_lines(EXAMPLE).unwrap()).prop_shuffle()
    ) {
        let mut net = Network::new(Goal::new(2, 5));
        net.apply_all(instrs).unwrap();
        let drained = net.drain().unwrap();
        prop_assert_eq!(drained.goal_match(), Some(Id::bot(2)));
        prop_assert_eq!(drained.sink(Id::output(0)), Some(&[5][..]));
        prop_assert_eq!(drained.sink(Id::output(1)), Some(&[2][..]));
        prop_assert_eq!(drained.sink(Id::output(2)), Some(&[3][..]));
        prop_assert!(drained.stranded().is_empty());
    }
}
