//! Node-level matcher tests.
//!
//! Each test parses a small pattern and inspects the full state set it
//! produces from one starting offset.

use crate::parser::{Node, parse};

use super::*;

fn run(pattern: &str, input: &str, start: usize) -> StateSet {
    run_with(pattern, input, start, FuelLimits::default()).expect("fuel should suffice")
}

fn run_with(
    pattern: &str,
    input: &str,
    start: usize,
    limits: FuelLimits,
) -> Result<StateSet, RuntimeError> {
    let root = parse(pattern).expect("pattern should parse").root;
    let input: Vec<char> = input.chars().collect();
    Matcher::new(&input, limits).match_at(&root, start)
}

fn ends(pattern: &str, input: &str, start: usize) -> Vec<usize> {
    run(pattern, input, start).positions()
}

fn capture(state: &MatchState, index: usize) -> Option<String> {
    state.captures.get(index).map(|text| text.iter().collect())
}

#[test]
fn literal() {
    assert_eq!(ends("a", "abc", 0), [1]);
    assert_eq!(ends("a", "abc", 1), [] as [usize; 0]);
    assert_eq!(ends("a", "a", 1), [] as [usize; 0]);
}

#[test]
fn digit_is_ascii_only() {
    assert_eq!(ends(r"\d", "7", 0), [1]);
    assert_eq!(ends(r"\d", "x", 0), [] as [usize; 0]);
    assert_eq!(ends(r"\d", "٣", 0), [] as [usize; 0]);
}

#[test]
fn word_chars() {
    for c in ["a", "Z", "0", "_"] {
        assert_eq!(ends(r"\w", c, 0), [1], "{c:?} is a word char");
    }
    for c in ["-", " ", "é", ""] {
        assert_eq!(ends(r"\w", c, 0), [] as [usize; 0], "{c:?} is not a word char");
    }
}

#[test]
fn any_consumes_one_char() {
    assert_eq!(ends(".", "é", 0), [1]);
    assert_eq!(ends(".", "", 0), [] as [usize; 0]);
}

#[test]
fn char_class() {
    assert_eq!(ends("[abc]", "b", 0), [1]);
    assert_eq!(ends("[abc]", "d", 0), [] as [usize; 0]);
    assert_eq!(ends("[^abc]", "d", 0), [1]);
    assert_eq!(ends("[^abc]", "a", 0), [] as [usize; 0]);
    assert_eq!(ends("[^abc]", "", 0), [] as [usize; 0]);
}

#[test]
fn sequence_threads_states() {
    assert_eq!(ends("ab", "abc", 0), [2]);
    assert_eq!(ends("ab", "acb", 0), [] as [usize; 0]);
    assert_eq!(ends("", "abc", 1), [1]);
}

#[test]
fn alternation_keeps_every_branch_in_order() {
    assert_eq!(ends("ab|a", "abc", 0), [2, 1]);
    assert_eq!(ends("a|ab", "abc", 0), [1, 2]);
}

#[test]
fn identical_states_collapse() {
    assert_eq!(run("a|a", "a", 0).len(), 1);
}

#[test]
fn states_with_different_captures_stay_distinct() {
    let states = run("(a)|a", "a", 0);
    assert_eq!(states.len(), 2);
    assert_eq!(states.positions(), [1]);

    let captured: Vec<_> = states.iter().map(|s| capture(s, 1)).collect();
    assert_eq!(captured, [Some("a".to_string()), None]);
}

#[test]
fn one_or_more_yields_every_count() {
    assert_eq!(ends("a+", "aaa", 0), [1, 2, 3]);
    assert_eq!(ends("a+", "", 0), [] as [usize; 0]);
}

#[test]
fn optional_prefers_stopping() {
    assert_eq!(ends("a?", "aa", 0), [0, 1]);
    assert_eq!(ends("a?", "b", 0), [0]);
}

#[test]
fn repetition_explores_all_depths() {
    // The trailing literal still needs a character after the group.
    let states = run("(a+)a", "aaa", 0);
    let found: Vec<_> = states
        .iter()
        .map(|s| (s.position, capture(s, 1).unwrap()))
        .collect();
    assert_eq!(found, [(2, "a".to_string()), (3, "aa".to_string())]);
}

#[test]
fn zero_width_iterations_terminate() {
    // An empty iteration never counts towards the minimum.
    assert!(run("()+", "abc", 0).is_empty());
    assert_eq!(ends("(a?)+", "aa", 0), [1, 2]);
    assert_eq!(ends("(|a)+", "a", 0), [1]);
}

#[test]
fn capture_records_consumed_text() {
    let states = run("x(a+)", "xaa", 0);
    let found: Vec<_> = states
        .iter()
        .map(|s| (s.position, capture(s, 1).unwrap()))
        .collect();
    assert_eq!(found, [(2, "a".to_string()), (3, "aa".to_string())]);
}

#[test]
fn nested_captures() {
    let states = run("((a)(b))", "ab", 0);
    assert_eq!(states.len(), 1);

    let state = states.iter().next().unwrap();
    assert_eq!(capture(state, 1).as_deref(), Some("ab"));
    assert_eq!(capture(state, 2).as_deref(), Some("a"));
    assert_eq!(capture(state, 3).as_deref(), Some("b"));
}

#[test]
fn capture_inside_repetition_keeps_latest_binding() {
    let states = run("(a|b)+", "ab", 0);
    let last = states.iter().find(|s| s.position == 2).unwrap();
    assert_eq!(capture(last, 1).as_deref(), Some("b"));
}

#[test]
fn sibling_branches_do_not_share_captures() {
    let states = run("(a)|(a)", "a", 0);
    let tables: Vec<Vec<usize>> = states
        .iter()
        .map(|s| s.captures.iter().map(|(index, _)| index).collect())
        .collect();
    assert_eq!(tables, [vec![1], vec![2]]);
}

#[test]
fn backreference_requires_a_binding() {
    assert_eq!(ends(r"\1", "a", 0), [] as [usize; 0]);
}

#[test]
fn backreference_compares_text() {
    let input: Vec<char> = "abab".chars().collect();
    let bound = CaptureTable::new().with(1, &['a', 'b']);
    let mut matcher = Matcher::new(&input, FuelLimits::default());

    let states = matcher
        .match_node(&Node::Backreference(1), 2, &bound, &mut NoopTracer)
        .unwrap();
    assert_eq!(states.positions(), [4]);

    let states = matcher
        .match_node(&Node::Backreference(1), 1, &bound, &mut NoopTracer)
        .unwrap();
    assert!(states.is_empty());

    // Too short.
    let states = matcher
        .match_node(&Node::Backreference(1), 3, &bound, &mut NoopTracer)
        .unwrap();
    assert!(states.is_empty());
}

#[test]
fn backreference_to_empty_capture() {
    assert_eq!(ends(r"()\1", "", 0), [0]);
}

#[test]
fn backreference_round_trip() {
    assert_eq!(ends(r"(\w+) \1", "hello hello", 0), [11]);
    assert!(run(r"(\w+) \1", "hello world", 0).is_empty());
}

#[test]
fn input_is_not_mutated_by_matching() {
    let incoming = CaptureTable::new().with(9, &['z']);
    let input: Vec<char> = "a".chars().collect();
    let root = parse("(a)").unwrap().root;

    let states = Matcher::new(&input, FuelLimits::default())
        .match_node(&root, 0, &incoming, &mut NoopTracer)
        .unwrap();

    assert_eq!(incoming.len(), 1);
    let state = states.iter().next().unwrap();
    assert_eq!(state.captures.len(), 2);
}

#[test]
fn fuel_limit_builders() {
    let limits = FuelLimits::new().exec_fuel(7).recursion_limit(9);
    assert_eq!(limits.get_exec_fuel(), 7);
    assert_eq!(limits.get_recursion_limit(), 9);

    let defaults = FuelLimits::default();
    assert_eq!(defaults.get_exec_fuel(), 10_000_000);
    assert_eq!(defaults.get_recursion_limit(), 1024);

    let input = "a".repeat(100);
    let states = run_with("(a|b)+", &input, 0, FuelLimits::unlimited()).unwrap();
    assert_eq!(states.len(), 100);
}

#[test]
fn exec_fuel_exhaustion() {
    let limits = FuelLimits::new().exec_fuel(3);
    let err = run_with("a+", "aaaa", 0, limits).unwrap_err();
    assert_eq!(err, RuntimeError::ExecFuelExhausted(3));
}

#[test]
fn recursion_limit() {
    let limits = FuelLimits::new().recursion_limit(3);
    let err = run_with("((((a))))", "a", 0, limits).unwrap_err();
    assert_eq!(err, RuntimeError::RecursionLimitExceeded(3));
}

#[test]
fn long_repetition_does_not_deepen_recursion() {
    let input = "a".repeat(5000);
    let limits = FuelLimits::new().recursion_limit(4);
    let states = run_with("a+", &input, 0, limits).unwrap();
    assert_eq!(states.len(), 5000);
}

#[test]
fn nested_repetition_stays_polynomial() {
    let input = "a".repeat(40);
    let limits = FuelLimits::new().exec_fuel(200_000);
    let states = run_with("(a+)+b", &input, 0, limits).unwrap();
    assert!(states.is_empty());
}

#[test]
fn fuel_is_shared_across_calls() {
    let input: Vec<char> = "aaa".chars().collect();
    let root = parse("a").unwrap().root;
    let mut matcher = Matcher::new(&input, FuelLimits::new().exec_fuel(2));

    assert!(matcher.match_at(&root, 0).is_ok());
    assert!(matcher.match_at(&root, 1).is_ok());
    assert_eq!(matcher.remaining_fuel(), 0);
    assert_eq!(
        matcher.match_at(&root, 2).unwrap_err(),
        RuntimeError::ExecFuelExhausted(2)
    );
}

#[derive(Default)]
struct RecordingTracer {
    entered: Vec<&'static str>,
    repeats: Vec<(u32, usize)>,
}

impl Tracer for RecordingTracer {
    fn trace_enter(&mut self, node: &Node, _position: usize, _depth: u32) {
        self.entered.push(node.kind_name());
    }

    fn trace_exit(&mut self, _node: &Node, _position: usize, _states: &StateSet) {}

    fn trace_repeat(&mut self, count: u32, position: usize) {
        self.repeats.push((count, position));
    }
}

#[test]
fn tracer_sees_visits_in_order() {
    let input: Vec<char> = "aa".chars().collect();
    let root = parse("a+").unwrap().root;
    let mut tracer = RecordingTracer::default();

    Matcher::new(&input, FuelLimits::default())
        .match_node(&root, 0, &CaptureTable::new(), &mut tracer)
        .unwrap();

    assert_eq!(
        tracer.entered,
        ["Repetition", "Literal", "Literal", "Literal"]
    );
    assert_eq!(tracer.repeats, [(0, 0), (1, 1), (2, 2)]);
}
