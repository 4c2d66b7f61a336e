//! Matching engine.
//!
//! Walks a parsed pattern against input characters, producing the set of
//! `(position, captures)` states reachable from a starting offset.

mod error;
mod state;
mod trace;
mod vm;

#[cfg(test)]
mod engine_tests;

pub use error::RuntimeError;
pub use state::{CaptureTable, MatchState, StateSet};
pub use trace::{LogTracer, NoopTracer, Tracer};
pub use vm::{FuelLimits, Matcher, is_word_char};
