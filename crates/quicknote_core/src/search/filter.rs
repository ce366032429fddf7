//! Case-insensitive substring filter over note content.
//!
//! # Invariants
//! - An empty query yields the input slice itself, not a copy.
//! - Matches keep their original relative order.
//! - The query is used as typed; whitespace is not trimmed.

use crate::model::note::Note;
use std::slice;

/// Borrowed view of the notes visible for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilteredNotes<'a> {
    /// Empty query: the whole sequence, unchanged.
    All(&'a [Note]),
    /// Non-empty query: matching notes in original order.
    Matching(Vec<&'a Note>),
}

impl<'a> FilteredNotes<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::All(notes) => notes.len(),
            Self::Matching(notes) => notes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether the view is the unfiltered sequence.
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::All(_))
    }

    pub fn iter(&self) -> FilteredIter<'a, '_> {
        match self {
            Self::All(notes) => FilteredIter::All(notes.iter()),
            Self::Matching(notes) => FilteredIter::Matching(notes.iter()),
        }
    }

    /// Clones the visible notes into an owned vector.
    pub fn to_vec(&self) -> Vec<Note> {
        self.iter().cloned().collect()
    }
}

/// Iterator over a `FilteredNotes` view.
pub enum FilteredIter<'a, 'v> {
    All(slice::Iter<'a, Note>),
    Matching(slice::Iter<'v, &'a Note>),
}

impl<'a> Iterator for FilteredIter<'a, '_> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::All(iter) => iter.next(),
            Self::Matching(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::All(iter) => iter.size_hint(),
            Self::Matching(iter) => iter.size_hint(),
        }
    }
}

impl<'a, 'v> IntoIterator for &'v FilteredNotes<'a> {
    type Item = &'a Note;
    type IntoIter = FilteredIter<'a, 'v>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Filters `notes` by case-insensitive substring match on `content`.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> FilteredNotes<'a> {
    if query.is_empty() {
        return FilteredNotes::All(notes);
    }

    let needle = query.to_lowercase();
    FilteredNotes::Matching(
        notes
            .iter()
            .filter(|note| note.content.to_lowercase().contains(needle.as_str()))
            .collect(),
    )
}
