//! Regrep: a small backtracking regex engine with captures and backreferences.
//!
//! # Example
//!
//! ```
//! use regrep_lib::Pattern;
//!
//! let pattern = Pattern::new(r"^(\w+) \1$").expect("valid pattern");
//! let found = pattern.find("hello hello").expect("within budget");
//! assert_eq!(found.and_then(|m| m.group(1).map(str::to_owned)), Some("hello".into()));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod engine;
pub mod parser;

mod pattern;


pub use diagnostics::DiagnosticsPrinter;
pub use engine::{FuelLimits, RuntimeError};
pub use parser::{ParseError, ParseErrorKind};
pub use pattern::{Anchors, Match, Pattern, is_match, strip_anchors};

/// Errors that can occur while compiling or matching a pattern.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The pattern text is malformed. `pattern` is the text the parser saw.
    #[error("invalid pattern `{pattern}`: {error}")]
    Parse { pattern: String, error: ParseError },

    /// A budget ran out: fuel while matching, or nesting while compiling.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The syntax error, when compilation failed on one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse { error, .. } => Some(error),
            Error::Runtime(_) => None,
        }
    }

    /// Renders the error for a terminal, with a caret under parse errors.
    pub fn render(&self, colored: bool) -> String {
        match self {
            Error::Parse { pattern, error } => {
                error.printer().source(pattern).colored(colored).render()
            }
            Error::Runtime(error) => error.to_string(),
        }
    }
}

/// Result type for pattern operations.
pub type Result<T> = std::result::Result<T, Error>;
