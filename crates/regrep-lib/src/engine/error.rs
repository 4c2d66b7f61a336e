//! Errors that can occur while matching.
//!
//! Failing to match is not an error. These only fire when a configured
//! budget runs out, while matching or, for nesting, while compiling.

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Execution fuel exhausted (too many node visits).
    #[error("match execution limit exceeded ({0} node visits)")]
    ExecFuelExhausted(u32),

    /// Pattern nested deeper than the recursion limit.
    #[error("recursion limit exceeded (depth {0})")]
    RecursionLimitExceeded(u32),
}
