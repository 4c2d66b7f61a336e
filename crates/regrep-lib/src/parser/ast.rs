//! Pattern AST.
//!
//! The node set is closed: the matcher dispatches over it exhaustively.
//! Trees are immutable once the parser returns them.

use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Exactly this character.
    Literal(char),
    /// One ASCII digit (`\d`).
    Digit,
    /// One ASCII letter, digit or underscore (`\w`).
    Word,
    /// Any single character (`.`).
    Any,
    /// `[...]` or `[^...]`.
    CharClass(CharClass),
    /// Concatenation. Empty sequences match the empty string.
    Sequence(Vec<Node>),
    /// `a|b|c`, branches in source order.
    Alternation(Vec<Node>),
    /// `x+` or `x?`.
    Repetition(Repetition),
    /// `( ... )`.
    Capture(Capture),
    /// `\N`, the text previously captured by group `N`.
    Backreference(usize),
}

impl Node {
    /// The node produced by an empty concatenation.
    pub fn empty() -> Self {
        Node::Sequence(Vec::new())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Literal(_) => "Literal",
            Node::Digit => "Digit",
            Node::Word => "Word",
            Node::Any => "Any",
            Node::CharClass(_) => "CharClass",
            Node::Sequence(_) => "Sequence",
            Node::Alternation(_) => "Alternation",
            Node::Repetition(_) => "Repetition",
            Node::Capture(_) => "Capture",
            Node::Backreference(_) => "Backreference",
        }
    }
}

/// Character set membership test. No ranges, no escapes inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    /// Members in the order they were written.
    pub set: IndexSet<char>,
    pub negated: bool,
}

impl CharClass {
    pub fn new(set: IndexSet<char>, negated: bool) -> Self {
        Self { set, negated }
    }

    #[inline]
    pub fn matches(&self, c: char) -> bool {
        self.set.contains(&c) != self.negated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    pub child: Box<Node>,
    pub min: u32,
    /// `None` is unbounded.
    pub max: Option<u32>,
}

impl Repetition {
    /// `child+`
    pub fn one_or_more(child: Node) -> Self {
        Self {
            child: Box::new(child),
            min: 1,
            max: None,
        }
    }

    /// `child?`
    pub fn optional(child: Node) -> Self {
        Self {
            child: Box::new(child),
            min: 0,
            max: Some(1),
        }
    }

    /// Whether `count` iterations satisfy the lower bound.
    #[inline]
    pub fn accepts(&self, count: u32) -> bool {
        count >= self.min
    }

    /// Whether another iteration may be attempted after `count`.
    #[inline]
    pub fn may_repeat(&self, count: u32) -> bool {
        self.max.is_none_or(|max| count < max)
    }

    /// Collapses counts that behave identically from here on.
    ///
    /// Without an upper bound, every count at or above `min` accepts and
    /// may repeat, so they are interchangeable.
    #[inline]
    pub fn count_key(&self, count: u32) -> u32 {
        match self.max {
            Some(_) => count,
            None => count.min(self.min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// 1-based group number.
    pub index: usize,
    pub child: Box<Node>,
}

impl Capture {
    pub fn new(index: usize, child: Node) -> Self {
        Self {
            index,
            child: Box::new(child),
        }
    }
}
