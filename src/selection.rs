// src/selection.rs - What the user has committed to, single or multiple

use serde::Serialize;
use std::slice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    #[default]
    Single,
    Multi,
}

impl SelectMode {
    /// The selection a fresh or cleared instance starts with.
    pub fn empty_selection<T>(self) -> Selection<T> {
        match self {
            SelectMode::Single => Selection::None,
            SelectMode::Multi => Selection::Many(Vec::new()),
        }
    }
}

/// Committed choice. `Many` keeps selection order and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items")]
pub enum Selection<T> {
    None,
    Single(T),
    Many(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::None
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Selection::None => &[],
            Selection::Single(item) => slice::from_ref(item),
            Selection::Many(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items().contains(item)
    }

    /// Append to a `Many` selection. Returns false for duplicates and for
    /// non-`Many` selections.
    pub fn push(&mut self, item: T) -> bool {
        match self {
            Selection::Many(items) if !items.contains(&item) => {
                items.push(item);
                true
            }
            _ => false,
        }
    }

    /// Drop `item` from a `Many` selection. Other variants are left alone.
    pub fn remove(&mut self, item: &T) -> bool {
        match self {
            Selection::Many(items) => {
                let before = items.len();
                items.retain(|existing| existing != item);
                items.len() != before
            }
            _ => false,
        }
    }
}

/// Candidates still eligible for matching.
///
/// With a `Many` selection the members are removed before the matcher sees
/// the list. `None`/`Single` leave it untouched.
pub fn filtered_candidates<'a, T: PartialEq>(
    all: &'a [T],
    selection: &Selection<T>,
) -> Vec<&'a T> {
    filtered_indices(all, selection)
        .into_iter()
        .map(|i| &all[i])
        .collect()
}

/// Positions in `all` of the candidates [`filtered_candidates`] keeps.
pub fn filtered_indices<T: PartialEq>(all: &[T], selection: &Selection<T>) -> Vec<usize> {
    match selection {
        Selection::Many(chosen) => (0..all.len())
            .filter(|&i| !chosen.contains(&all[i]))
            .collect(),
        Selection::None | Selection::Single(_) => (0..all.len()).collect(),
    }
}
