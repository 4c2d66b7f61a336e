//! Tracing hooks for matcher execution.
//!
//! The matcher is generic over [`Tracer`]. With [`NoopTracer`] every hook
//! is an empty inline function and disappears at compile time; [`LogTracer`]
//! forwards each event to the `log` facade at trace level.

use crate::parser::Node;

use super::state::StateSet;

pub trait Tracer {
    /// Called before a node is matched at `position`.
    fn trace_enter(&mut self, node: &Node, position: usize, depth: u32);

    /// Called after a node produced `states` from `position`.
    fn trace_exit(&mut self, node: &Node, position: usize, states: &StateSet);

    /// Called when a repetition considers stopping after `count` iterations.
    fn trace_repeat(&mut self, count: u32, position: usize);
}

/// Tracer that does nothing.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _node: &Node, _position: usize, _depth: u32) {}

    #[inline(always)]
    fn trace_exit(&mut self, _node: &Node, _position: usize, _states: &StateSet) {}

    #[inline(always)]
    fn trace_repeat(&mut self, _count: u32, _position: usize) {}
}

/// Tracer that writes one `log::trace!` line per event.
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace_enter(&mut self, node: &Node, position: usize, depth: u32) {
        log::trace!(
            "{:indent$}{} @{}",
            "",
            node.kind_name(),
            position,
            indent = depth as usize
        );
    }

    fn trace_exit(&mut self, node: &Node, position: usize, states: &StateSet) {
        if states.is_empty() {
            log::trace!("{} @{} failed", node.kind_name(), position);
        } else {
            log::trace!(
                "{} @{} -> {:?}",
                node.kind_name(),
                position,
                states.positions()
            );
        }
    }

    fn trace_repeat(&mut self, count: u32, position: usize) {
        log::trace!("repeat #{} @{}", count, position);
    }
}
