//! Human-readable rendering of pattern errors.
//!
//! A [`ParseError`](crate::parser::ParseError) only knows a kind and a
//! character offset. The printer pairs it with the pattern text and draws
//! the offending line with a caret under the position.

mod printer;


pub use printer::DiagnosticsPrinter;
