//! Row selections keyed by one of two incompatible index spaces.
//!
//! An [`OriginalIndex`] is a position in the unfiltered cache and survives
//! reloads and re-filtering. A [`DisplayedIndex`] is a position in whatever
//! list is on screen right now. The two never convert implicitly; crossing
//! from displayed to original goes through `RecordFilter::original_index`.

use std::collections::BTreeSet;

/// Position of a record in the unfiltered source list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OriginalIndex(usize);

impl OriginalIndex {
    /// Wrap a source-list position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw position.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Position of a record in the list currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayedIndex(usize);

impl DisplayedIndex {
    /// Wrap an on-screen position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw position.
    pub fn get(self) -> usize {
        self.0
    }
}

/// A set of selected rows in one index space.
///
/// Use through [`OriginalSelection`] or [`DisplayedSelection`]; the index
/// type keeps the two from being mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<I: Ord + Copy>(BTreeSet<I>);

/// Rows marked for deletion from the cache, keyed by source position.
pub type OriginalSelection = SelectionSet<OriginalIndex>;

/// Rows marked for saving from the on-screen list.
///
/// Only valid for the list it was built against; discard it whenever that
/// list is replaced.
pub type DisplayedSelection = SelectionSet<DisplayedIndex>;

impl<I: Ord + Copy> Default for SelectionSet<I> {
    fn default() -> Self {
        Self(BTreeSet::new())
    }
}

impl<I: Ord + Copy> SelectionSet<I> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `index`. Returns whether it is now selected.
    pub fn toggle(&mut self, index: I) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    /// Whether `index` is selected.
    pub fn contains(&self, index: I) -> bool {
        self.0.contains(&index)
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = I> + '_ {
        self.0.iter().copied()
    }
}

impl<I: Ord + Copy> FromIterator<I> for SelectionSet<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
