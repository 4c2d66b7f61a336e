//! Pattern parser.
//!
//! # Architecture
//!
//! A hand-written recursive-descent parser over the pattern's characters.
//! It produces an owned [`Node`] tree in a single pass; there is no separate
//! lexer and no error recovery. The first structural defect aborts parsing
//! with a [`ParseError`] carrying the character offset where it was detected.
//! Group nesting is bounded by the recursion limit of [`FuelLimits`], so a
//! hostile pattern fails with a typed error instead of exhausting the stack.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! alternation   := concatenation ('|' concatenation)*
//! concatenation := repetition*              -- stops at ')', '|' or end
//! repetition    := atom ('+' | '?')?
//! atom          := '(' alternation ')' | '.' | escape | class | literal
//! escape        := '\' ('d' | 'w' | [1-9][0-9]*)
//! class         := '[' '^'? char* ']'
//! ```
//!
//! Capture groups are numbered from 1 in the order their `(` is consumed,
//! so nested groups follow conventional left-to-right numbering.

pub mod ast;

mod core;
mod error;
mod printer;

#[cfg(test)]
mod core_tests;

use std::borrow::Cow;

use crate::engine::FuelLimits;

pub use ast::{Capture, CharClass, Node, Repetition};
pub use core::Parser;
pub use error::{ParseError, ParseErrorKind};
pub use printer::NodePrinter;

/// Output of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub root: Node,
    /// Number of capture groups opened while parsing.
    pub group_count: usize,
}

/// Collapses every `\\` into a single `\`.
///
/// Patterns coming from shells or config files often carry a doubled
/// backslash where a single escape was meant. This runs once, before
/// anchors are stripped and before the grammar sees the text.
pub fn unescape(pattern: &str) -> Cow<'_, str> {
    if pattern.contains(r"\\") {
        Cow::Owned(pattern.replace(r"\\", r"\"))
    } else {
        Cow::Borrowed(pattern)
    }
}

/// Parses a whole pattern with the default nesting limit. Leftover input is
/// an error.
pub fn parse(pattern: &str) -> crate::Result<ParseResult> {
    parse_with_limits(pattern, FuelLimits::default())
}

/// Parses a whole pattern, nesting groups at most `limits.get_recursion_limit()`
/// deep.
pub fn parse_with_limits(pattern: &str, limits: FuelLimits) -> crate::Result<ParseResult> {
    Parser::new(pattern)
        .with_recursion_limit(Some(limits.get_recursion_limit()))
        .parse()
}
