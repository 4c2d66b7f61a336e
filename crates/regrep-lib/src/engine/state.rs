//! Match states and capture tables.
//!
//! A match state is one way the engine could have consumed input so far:
//! a position plus the captures bound on the way there. Matching a node
//! yields a set of them.

use std::collections::BTreeMap;
use std::rc::Rc;

use indexmap::IndexSet;
use indexmap::set::IntoIter;

/// Persistent map from group index to captured characters.
///
/// Clones share storage. [`CaptureTable::with`] copies the map before
/// inserting, so a binding made on one branch is never visible on a sibling.
/// Equality and hashing are by content, with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CaptureTable(Rc<BTreeMap<usize, Rc<[char]>>>);

impl CaptureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<&[char]> {
        self.0.get(&index).map(|text| &**text)
    }

    /// Returns a new table with `index` bound to `text`. Rebinding replaces.
    pub fn with(&self, index: usize, text: &[char]) -> Self {
        let mut bindings = BTreeMap::clone(&self.0);
        bindings.insert(index, Rc::from(text));
        Self(Rc::new(bindings))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in ascending group order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[char])> + '_ {
        self.0.iter().map(|(&index, text)| (index, &**text))
    }

    pub fn to_strings(&self) -> BTreeMap<usize, String> {
        self.iter()
            .map(|(index, text)| (index, text.iter().collect()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchState {
    /// Character offset just past the consumed input.
    pub position: usize,
    pub captures: CaptureTable,
}

impl MatchState {
    pub fn new(position: usize, captures: CaptureTable) -> Self {
        Self { position, captures }
    }
}

/// Deduplicated states in discovery order.
///
/// Two states collapse when both position and every capture binding are
/// equal. The first occurrence keeps its slot, so iteration order is the
/// backtracking search order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSet(IndexSet<MatchState>);

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(state: MatchState) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Returns `false` if an identical state was already present.
    pub fn insert(&mut self, state: MatchState) -> bool {
        self.0.insert(state)
    }

    pub fn contains(&self, state: &MatchState) -> bool {
        self.0.contains(state)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MatchState> + '_ {
        self.0.iter()
    }

    /// End positions in discovery order, duplicates removed.
    pub fn positions(&self) -> Vec<usize> {
        let positions: IndexSet<usize> = self.0.iter().map(|s| s.position).collect();
        positions.into_iter().collect()
    }
}

impl Extend<MatchState> for StateSet {
    fn extend<I: IntoIterator<Item = MatchState>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<MatchState> for StateSet {
    fn from_iter<I: IntoIterator<Item = MatchState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StateSet {
    type Item = MatchState;
    type IntoIter = IntoIter<MatchState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'s> IntoIterator for &'s StateSet {
    type Item = &'s MatchState;
    type IntoIter = indexmap::set::Iter<'s, MatchState>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
