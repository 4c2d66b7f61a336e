//! Parser state and productions.

use indexmap::IndexSet;

use super::ParseResult;
use super::ast::{Capture, CharClass, Node, Repetition};
use super::error::{ParseError, ParseErrorKind};
use crate::Error;
use crate::engine::RuntimeError;

/// Single-use recursive-descent parser. Positions are character offsets.
pub struct Parser {
    source: String,
    pattern: Vec<char>,
    pos: usize,
    group_count: usize,
    /// Groups currently open.
    depth: u32,
    recursion_limit: Option<u32>,
}

/// Internal failure: a syntax error, or nesting past the recursion limit.
enum Failure {
    Syntax(ParseError),
    TooDeep(u32),
}

impl From<ParseError> for Failure {
    fn from(error: ParseError) -> Self {
        Failure::Syntax(error)
    }
}

type PResult<T> = std::result::Result<T, Failure>;

impl Parser {
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_owned(),
            pattern: pattern.chars().collect(),
            pos: 0,
            group_count: 0,
            depth: 0,
            recursion_limit: None,
        }
    }

    /// Caps group nesting. `None` leaves it unbounded.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Parses the whole pattern, requiring every character to be consumed.
    ///
    /// Syntax errors come back as [`Error::Parse`]. Nesting deeper than the
    /// recursion limit is [`Error::Runtime`] with
    /// [`RuntimeError::RecursionLimitExceeded`].
    pub fn parse(mut self) -> crate::Result<ParseResult> {
        match self.parse_root() {
            Ok(root) => Ok(ParseResult {
                root,
                group_count: self.group_count,
            }),
            Err(Failure::Syntax(error)) => Err(Error::Parse {
                pattern: self.source,
                error,
            }),
            Err(Failure::TooDeep(limit)) => {
                Err(RuntimeError::RecursionLimitExceeded(limit).into())
            }
        }
    }

    fn parse_root(&mut self) -> PResult<Node> {
        let root = self.parse_alternation()?;

        // Only an unbalanced `)` can stop the top-level alternation early.
        if let Some(c) = self.peek() {
            return Err(self.error_here(ParseErrorKind::UnexpectedCharacter(c)).into());
        }
        Ok(root)
    }

    fn enter_recursion(&mut self) -> PResult<()> {
        if let Some(limit) = self.recursion_limit
            && self.depth >= limit
        {
            return Err(Failure::TooDeep(limit));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn peek(&self) -> Option<char> {
        self.pattern.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos)
    }

    fn parse_alternation(&mut self) -> PResult<Node> {
        let first = self.parse_concatenation()?;
        if self.peek() != Some('|') {
            return Ok(first);
        }

        let mut branches = vec![first];
        while self.eat('|') {
            branches.push(self.parse_concatenation()?);
        }
        Ok(Node::Alternation(branches))
    }

    fn parse_concatenation(&mut self) -> PResult<Node> {
        let mut parts = Vec::new();
        while let Some(c) = self.peek() {
            if c == ')' || c == '|' {
                break;
            }
            parts.push(self.parse_repetition()?);
        }

        Ok(match <[Node; 1]>::try_from(parts) {
            Ok([only]) => only,
            Err(parts) => Node::Sequence(parts),
        })
    }

    fn parse_repetition(&mut self) -> PResult<Node> {
        let atom = self.parse_atom()?;
        let node = match self.peek() {
            Some('+') => Node::Repetition(Repetition::one_or_more(atom)),
            Some('?') => Node::Repetition(Repetition::optional(atom)),
            _ => return Ok(atom),
        };
        self.pos += 1;
        Ok(node)
    }

    fn parse_atom(&mut self) -> PResult<Node> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error_here(ParseErrorKind::UnexpectedEnd).into());
        };

        match c {
            '(' => self.parse_group(start),
            '.' => Ok(Node::Any),
            '\\' => self.parse_escape(start),
            '[' => self.parse_class(start),
            _ => Ok(Node::Literal(c)),
        }
    }

    /// After `(`. The index is taken before the body so outer groups
    /// number lower than the groups nested inside them.
    fn parse_group(&mut self, open: usize) -> PResult<Node> {
        self.enter_recursion()?;
        self.group_count += 1;
        let index = self.group_count;

        let body = self.parse_alternation()?;
        self.exit_recursion();
        if !self.eat(')') {
            return Err(ParseError::new(ParseErrorKind::UnterminatedGroup, open).into());
        }
        Ok(Node::Capture(Capture::new(index, body)))
    }

    /// After `\`.
    fn parse_escape(&mut self, backslash: usize) -> PResult<Node> {
        let Some(c) = self.peek() else {
            return Err(ParseError::new(ParseErrorKind::DanglingEscape, backslash).into());
        };

        if matches!(c, '1'..='9') {
            let mut index: usize = 0;
            while let Some(digit) = self.peek().and_then(|d| d.to_digit(10)) {
                index = index.saturating_mul(10).saturating_add(digit as usize);
                self.pos += 1;
            }
            return Ok(Node::Backreference(index));
        }

        let escaped_at = self.pos;
        self.pos += 1;
        match c {
            'd' => Ok(Node::Digit),
            'w' => Ok(Node::Word),
            other => {
                Err(ParseError::new(ParseErrorKind::UnsupportedEscape(other), escaped_at).into())
            }
        }
    }

    /// After `[`. Everything up to the first `]` is a member, verbatim.
    fn parse_class(&mut self, open: usize) -> PResult<Node> {
        let negated = self.eat('^');
        let mut set = IndexSet::new();
        loop {
            match self.bump() {
                Some(']') => break,
                Some(c) => {
                    set.insert(c);
                }
                None => {
                    return Err(
                        ParseError::new(ParseErrorKind::UnterminatedCharClass, open).into(),
                    );
                }
            }
        }
        Ok(Node::CharClass(CharClass::new(set, negated)))
    }
}
