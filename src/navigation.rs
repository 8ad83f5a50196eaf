// src/navigation.rs - Highlight counter and active candidate resolution
//
// The highlight is an unbounded counter, turned into an index only against
// the current match list length, so it never points past the end.

use std::num::NonZeroUsize;

use crate::search::SearchResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Raw typed text; `None` when the input is not being typed into.
    pub query: Option<String>,
    /// Net number of down moves minus up moves since the last reset.
    pub highlight: Option<i64>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, text: String) {
        self.query = Some(text);
    }

    pub fn cancel_query(&mut self) {
        self.query = None;
    }

    pub fn move_down(&mut self) {
        self.highlight = Some(self.highlight.unwrap_or(0).saturating_add(1));
    }

    pub fn move_up(&mut self) {
        self.highlight = Some(self.highlight.unwrap_or(0).saturating_sub(1));
    }

    pub fn reset_highlight(&mut self) {
        self.highlight = None;
    }

    /// Index the counter points at in a list of `len` items.
    pub fn highlighted_index(&self, len: usize) -> Option<usize> {
        let len = NonZeroUsize::new(len)?;
        Some(match self.highlight {
            Some(counter) if len.get() > 1 => non_negative_remainder(counter, len),
            _ => 0,
        })
    }
}

/// Euclidean remainder: always in `0..len`, also for negative counters.
pub fn non_negative_remainder(counter: i64, len: NonZeroUsize) -> usize {
    let len = i64::try_from(len.get()).unwrap_or(i64::MAX);
    counter.rem_euclid(len) as usize
}

/// The candidate a confirm would commit.
pub fn resolve_active_candidate<T>(result: &SearchResult<T>, highlight: Option<i64>) -> Option<&T> {
    match result.items()? {
        [] => None,
        [only] => Some(only),
        items => {
            let index = match highlight {
                None => 0,
                Some(counter) => non_negative_remainder(counter, NonZeroUsize::new(items.len())?),
            };
            items.get(index)
        }
    }
}
