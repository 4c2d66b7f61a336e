//! Backtracking matcher.
//!
//! Backtracking is expressed by returning every reachable state instead of
//! undoing work: matching a node never mutates its inputs, it only builds
//! a new [`StateSet`]. Callers that only need one answer pick the first
//! acceptable state, which is the one a depth-first backtracker would find.

use std::collections::HashSet;

use crate::parser::{Capture, Node, Repetition};

use super::error::RuntimeError;
use super::state::{CaptureTable, MatchState, StateSet};
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for a single match call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuelLimits {
    /// Maximum node visits (default: 10,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum nesting of node evaluations (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 10_000_000,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits that never trip in practice.
    pub fn unlimited() -> Self {
        Self {
            exec_fuel: u32::MAX,
            recursion_limit: u32::MAX,
        }
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Matcher state for one input.
///
/// Fuel is shared by every call made through the same matcher. Callers
/// wanting a budget per start offset use a fresh matcher for each.
pub struct Matcher<'i> {
    input: &'i [char],
    exec_fuel: u32,
    depth: u32,
    limits: FuelLimits,
}

impl<'i> Matcher<'i> {
    pub fn new(input: &'i [char], limits: FuelLimits) -> Self {
        Self {
            input,
            exec_fuel: limits.exec_fuel,
            depth: 0,
            limits,
        }
    }

    /// Node visits left before [`RuntimeError::ExecFuelExhausted`].
    pub fn remaining_fuel(&self) -> u32 {
        self.exec_fuel
    }

    /// Match `root` from `start` with no captures bound.
    pub fn match_at(&mut self, root: &Node, start: usize) -> Result<StateSet, RuntimeError> {
        self.match_node(root, start, &CaptureTable::new(), &mut NoopTracer)
    }

    /// Every state reachable by matching `node` at `position`.
    pub fn match_node<T: Tracer>(
        &mut self,
        node: &Node,
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        self.consume_fuel()?;
        if self.depth >= self.limits.recursion_limit {
            return Err(RuntimeError::RecursionLimitExceeded(
                self.limits.recursion_limit,
            ));
        }

        self.depth += 1;
        tracer.trace_enter(node, position, self.depth);
        let result = self.dispatch(node, position, captures, tracer);
        self.depth -= 1;

        if let Ok(states) = &result {
            tracer.trace_exit(node, position, states);
        }
        result
    }

    fn consume_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    fn dispatch<T: Tracer>(
        &mut self,
        node: &Node,
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        match node {
            Node::Literal(expected) => Ok(self.step(position, captures, |c| c == *expected)),
            Node::Digit => Ok(self.step(position, captures, |c| c.is_ascii_digit())),
            Node::Word => Ok(self.step(position, captures, is_word_char)),
            Node::Any => Ok(self.step(position, captures, |_| true)),
            Node::CharClass(class) => Ok(self.step(position, captures, |c| class.matches(c))),
            Node::Sequence(children) => self.match_sequence(children, position, captures, tracer),
            Node::Alternation(branches) => {
                self.match_alternation(branches, position, captures, tracer)
            }
            Node::Repetition(rep) => self.match_repetition(rep, position, captures, tracer),
            Node::Capture(capture) => self.match_capture(capture, position, captures, tracer),
            Node::Backreference(index) => Ok(self.match_backreference(*index, position, captures)),
        }
    }

    /// Single-character nodes: one state one past `position`, or none.
    fn step(
        &self,
        position: usize,
        captures: &CaptureTable,
        accept: impl Fn(char) -> bool,
    ) -> StateSet {
        match self.input.get(position) {
            Some(&c) if accept(c) => {
                StateSet::single(MatchState::new(position + 1, captures.clone()))
            }
            _ => StateSet::new(),
        }
    }

    fn match_sequence<T: Tracer>(
        &mut self,
        children: &[Node],
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        let mut states = StateSet::single(MatchState::new(position, captures.clone()));
        for child in children {
            let mut next = StateSet::new();
            for state in &states {
                next.extend(self.match_node(child, state.position, &state.captures, tracer)?);
            }
            states = next;
            if states.is_empty() {
                break;
            }
        }
        Ok(states)
    }

    fn match_alternation<T: Tracer>(
        &mut self,
        branches: &[Node],
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        let mut states = StateSet::new();
        for branch in branches {
            states.extend(self.match_node(branch, position, captures, tracer)?);
        }
        Ok(states)
    }

    /// Explores every iteration count, not just the greedy one.
    ///
    /// Depth-first in pre-order: at each count the "stop here" state is
    /// recorded before the child is tried again, and each successor is
    /// fully expanded before the next one. An explicit stack keeps the
    /// native call depth independent of how many iterations match.
    /// Iterations that consume nothing are dropped, which is what makes
    /// `()+` and friends terminate. A state already expanded at an
    /// equivalent count is not expanded again; its subtree could only
    /// rediscover states that are already in `results`.
    fn match_repetition<T: Tracer>(
        &mut self,
        rep: &Repetition,
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        let mut results = StateSet::new();
        let mut pending = vec![(MatchState::new(position, captures.clone()), 0u32)];
        let mut expanded = HashSet::new();

        while let Some((state, count)) = pending.pop() {
            if !expanded.insert((state.clone(), rep.count_key(count))) {
                continue;
            }
            tracer.trace_repeat(count, state.position);
            if rep.accepts(count) {
                results.insert(state.clone());
            }
            if !rep.may_repeat(count) {
                continue;
            }

            let next = self.match_node(&rep.child, state.position, &state.captures, tracer)?;
            pending.extend(
                next.into_iter()
                    .rev()
                    .filter(|advanced| advanced.position > state.position)
                    .map(|advanced| (advanced, count + 1)),
            );
        }

        Ok(results)
    }

    fn match_capture<T: Tracer>(
        &mut self,
        capture: &Capture,
        position: usize,
        captures: &CaptureTable,
        tracer: &mut T,
    ) -> Result<StateSet, RuntimeError> {
        let inner = self.match_node(&capture.child, position, captures, tracer)?;
        Ok(inner
            .into_iter()
            .map(|state| {
                let text = &self.input[position..state.position];
                let bound = state.captures.with(capture.index, text);
                MatchState::new(state.position, bound)
            })
            .collect())
    }

    /// An unbound group never matches, not even the empty string.
    fn match_backreference(
        &self,
        index: usize,
        position: usize,
        captures: &CaptureTable,
    ) -> StateSet {
        let Some(group) = captures.get(index) else {
            return StateSet::new();
        };

        let end = position + group.len();
        match self.input.get(position..end) {
            Some(text) if text == group => {
                StateSet::single(MatchState::new(end, captures.clone()))
            }
            _ => StateSet::new(),
        }
    }
}

/// `\w`: ASCII letter, digit or underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
