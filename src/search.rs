// src/search.rs - Threshold filtering, ranking and cutoff over a candidate list

use log::{debug, trace};
use serde::Serialize;

use crate::config::Config;
use crate::fuzzy;
use crate::query;

/// Outcome of running (or not running) a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items")]
pub enum SearchResult<T> {
    /// The query transform declined; nothing should be shown.
    NotSearched,
    /// Matches in ascending score order, possibly empty.
    ItemsFound(Vec<T>),
}

impl<T> SearchResult<T> {
    pub fn is_searched(&self) -> bool {
        matches!(self, SearchResult::ItemsFound(_))
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            SearchResult::NotSearched => None,
            SearchResult::ItemsFound(items) => Some(items),
        }
    }

    /// Number of matches; zero when no search ran.
    pub fn len(&self) -> usize {
        self.items().map_or(0, <[T]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
        match self {
            SearchResult::NotSearched => SearchResult::NotSearched,
            SearchResult::ItemsFound(items) => {
                SearchResult::ItemsFound(items.into_iter().map(f).collect())
            }
        }
    }

    /// Keep the first `cutoff` matches. Never reorders.
    pub fn truncated(self, cutoff: Option<usize>) -> Self {
        match (self, cutoff) {
            (SearchResult::ItemsFound(mut items), Some(n)) => {
                items.truncate(n);
                SearchResult::ItemsFound(items)
            }
            (result, _) => result,
        }
    }
}

/// One accepted candidate with everything a display layer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    pub item: T,
    /// Position of the item in the candidate sequence that was searched.
    pub index: usize,
    pub score: u32,
    /// Matched grapheme indices in the item's label.
    pub positions: Vec<usize>,
}

/// Score, filter and rank `candidates` with full match details.
pub fn ranked_items<'a, T, I>(
    config: &Config<T>,
    query: Option<&str>,
    candidates: I,
) -> SearchResult<Ranked<&'a T>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    let Some(query) = query::prepare(&config.transform_query, query) else {
        trace!("query gated, not searching");
        return SearchResult::NotSearched;
    };

    let settings = &config.settings;
    let weights = settings.penalties.weights();
    let mut total = 0;

    let mut ranked: Vec<Ranked<&T>> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            total += 1;
            let label = config.label(item);
            let result = fuzzy::match_label(&query, &label, &weights, &settings.separators);
            (result.score < settings.score_threshold).then_some(Ranked {
                item,
                index,
                score: result.score,
                positions: result.positions,
            })
        })
        .collect();

    // Stable: equal scores keep candidate order.
    ranked.sort_by_key(|r| r.score);

    debug!(
        "query {:?} matched {} of {} candidates",
        query,
        ranked.len(),
        total
    );
    SearchResult::ItemsFound(ranked)
}

/// [`ranked_items`] truncated to the configured cutoff.
pub fn ranked_items_with_cutoff<'a, T, I>(
    config: &Config<T>,
    query: Option<&str>,
    candidates: I,
) -> SearchResult<Ranked<&'a T>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    ranked_items(config, query, candidates).truncated(config.settings.cutoff)
}

pub fn matched_items<'a, T, I>(
    config: &Config<T>,
    query: Option<&str>,
    candidates: I,
) -> SearchResult<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    ranked_items(config, query, candidates).map(|r| r.item)
}

pub fn matched_items_with_cutoff<'a, T, I>(
    config: &Config<T>,
    query: Option<&str>,
    candidates: I,
) -> SearchResult<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    matched_items(config, query, candidates).truncated(config.settings.cutoff)
}
