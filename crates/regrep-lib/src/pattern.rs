//! Compiled patterns and the anchored scan over start offsets.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::{CaptureTable, FuelLimits, LogTracer, Matcher, StateSet};
use crate::parser::{self, Node};
use crate::{Error, Result};

/// `^` and `$` found at the edges of the raw pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: bool,
    pub end: bool,
}

/// A pattern that parsed successfully and can be matched many times.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    source: String,
    anchors: Anchors,
    root: Node,
    group_count: usize,
    limits: FuelLimits,
}

/// First accepting match found by the scan.
///
/// Offsets are in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    /// Groups that took part in the match. Unmatched groups are absent.
    pub captures: BTreeMap<usize, String>,
}

impl Match {
    pub fn group(&self, index: usize) -> Option<&str> {
        self.captures.get(&index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Pattern {
    /// Unescapes `\\`, strips one leading `^` and one trailing `$`, then
    /// parses what is left under the default limits.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::compile(pattern, FuelLimits::default())
    }

    /// Like [`Pattern::new`], with `limits` bounding both group nesting
    /// while parsing and every later search.
    pub fn compile(pattern: &str, limits: FuelLimits) -> Result<Self> {
        let unescaped = parser::unescape(pattern);
        let (source, anchors) = strip_anchors(&unescaped);

        let parsed = parser::parse_with_limits(source, limits)?;

        log::debug!(
            "compiled {:?}: {} group(s), anchored start={} end={}",
            pattern,
            parsed.group_count,
            anchors.start,
            anchors.end
        );

        Ok(Self {
            raw: pattern.to_owned(),
            source: source.to_owned(),
            anchors,
            root: parsed.root,
            group_count: parsed.group_count,
            limits,
        })
    }

    pub fn with_limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The pattern as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The text the parser saw: unescaped, anchors removed.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn limits(&self) -> FuelLimits {
        self.limits
    }

    pub fn is_match(&self, input: &str) -> Result<bool> {
        Ok(self.find(input)?.is_some())
    }

    /// Tries each start offset in turn and returns the first acceptable
    /// end state in search order.
    ///
    /// Every start offset runs on a fresh fuel budget, so a long line that
    /// never matches costs more time but does not fail.
    ///
    /// An anchored start only tries offset 0. Otherwise every offset from
    /// 0 to the input length inclusive is tried, so an empty pattern
    /// matches at the very end of the input too.
    pub fn find(&self, input: &str) -> Result<Option<Match>> {
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let last_start = if self.anchors.start { 0 } else { len };

        for start in 0..=last_start {
            let mut matcher = Matcher::new(&chars, self.limits);
            let states = self.match_from(&mut matcher, start)?;
            let accepted = states
                .into_iter()
                .find(|state| !self.anchors.end || state.position == len);

            if let Some(state) = accepted {
                return Ok(Some(Match {
                    start,
                    end: state.position,
                    captures: state.captures.to_strings(),
                }));
            }
        }

        Ok(None)
    }

    fn match_from(&self, matcher: &mut Matcher<'_>, start: usize) -> Result<StateSet> {
        let states = if log::log_enabled!(log::Level::Trace) {
            matcher.match_node(&self.root, start, &CaptureTable::new(), &mut LogTracer)?
        } else {
            matcher.match_at(&self.root, start)?
        };
        Ok(states)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = Error;

    fn try_from(pattern: &str) -> Result<Self> {
        Self::new(pattern)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Removes at most one `^` from the front and one `$` from the back.
///
/// The check is purely textual: an escaped `\$` at the end still counts
/// as an anchor.
pub fn strip_anchors(pattern: &str) -> (&str, Anchors) {
    let mut anchors = Anchors::default();
    let mut rest = pattern;

    if let Some(stripped) = rest.strip_prefix('^') {
        anchors.start = true;
        rest = stripped;
    }
    if let Some(stripped) = rest.strip_suffix('$') {
        anchors.end = true;
        rest = stripped;
    }

    (rest, anchors)
}

/// Compiles `pattern` and tests it against `input` once.
pub fn is_match(pattern: &str, input: &str) -> Result<bool> {
    Pattern::new(pattern)?.is_match(input)
}
