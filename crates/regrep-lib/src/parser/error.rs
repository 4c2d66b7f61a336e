//! Pattern compile errors.

/// A structural defect in the pattern text.
///
/// `position` is a character (not byte) offset into the pattern the parser
/// was given, i.e. after unescaping and anchor stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unterminated group")]
    UnterminatedGroup,

    /// `\` as the last character.
    #[error("dangling escape")]
    DanglingEscape,

    #[error("unsupported escape: \\{0}")]
    UnsupportedEscape(char),

    #[error("unterminated character class")]
    UnterminatedCharClass,

    /// Input left over after the top-level alternation.
    #[error("unexpected character `{0}`")]
    UnexpectedCharacter(char),

    /// Reserved; this grammar never produces it.
    #[error("unexpected end of pattern")]
    UnexpectedEnd,
}

impl ParseErrorKind {
    /// Short label for the annotated source line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnterminatedGroup => "this `(` is never closed",
            Self::DanglingEscape => "nothing to escape",
            Self::UnsupportedEscape(_) => "only `\\d`, `\\w` and `\\1`..`\\9` are supported",
            Self::UnterminatedCharClass => "this `[` is never closed",
            Self::UnexpectedCharacter(_) => "no group to close here",
            Self::UnexpectedEnd => "pattern ends here",
        }
    }
}
