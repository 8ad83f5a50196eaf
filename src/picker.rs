// src/picker.rs - Per-instance selection and navigation state machine

use log::{debug, trace};
use lru::LruCache;
use std::num::NonZeroUsize;

use crate::config::Config;
use crate::navigation::{NavigationState, resolve_active_candidate};
use crate::query;
use crate::search::{self, Ranked, SearchResult};
use crate::selection::{SelectMode, Selection, filtered_indices};

/// Input the display layer forwards to the picker, one per user action.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent<T> {
    QueryChanged(String),
    Focus,
    Blur,
    MoveDown,
    MoveUp,
    Escape,
    Confirm,
    Remove(T),
    Clear,
}

/// What the host should hear about after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerNotice<T> {
    Focused,
    Blurred,
    Selected(T),
    Removed(T),
    Cleared,
    QueryCancelled,
}

/// State of one searchable select. Instances share nothing.
#[derive(Debug)]
pub struct Picker<T> {
    config: Config<T>,
    mode: SelectMode,
    candidates: Vec<T>,
    nav: NavigationState,
    selection: Selection<T>,
    focused: bool,
    // transformed query -> candidate indices after cutoff
    cache: Option<LruCache<String, Vec<usize>>>,
}

impl<T: Clone + PartialEq> Picker<T> {
    pub fn new(config: Config<T>, mode: SelectMode, candidates: Vec<T>) -> Self {
        let cache = NonZeroUsize::new(config.settings.cache_capacity).map(LruCache::new);
        Self {
            config,
            mode,
            candidates,
            nav: NavigationState::new(),
            selection: mode.empty_selection(),
            focused: false,
            cache,
        }
    }

    pub fn config(&self) -> &Config<T> {
        &self.config
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn query(&self) -> Option<&str> {
        self.nav.query.as_deref()
    }

    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Replace the candidate list. The highlight counter is kept and simply
    /// resolves against the new matches.
    pub fn set_candidates(&mut self, candidates: Vec<T>) {
        self.candidates = candidates;
        self.invalidate_cache();
    }

    pub fn handle_event(&mut self, event: PickerEvent<T>) -> Option<PickerNotice<T>> {
        match event {
            PickerEvent::QueryChanged(text) => {
                self.on_query_change(text);
                None
            }
            PickerEvent::Focus => Some(self.on_focus()),
            PickerEvent::Blur => Some(self.on_blur()),
            PickerEvent::MoveDown => {
                self.on_move_down();
                None
            }
            PickerEvent::MoveUp => {
                self.on_move_up();
                None
            }
            PickerEvent::Escape => self.on_escape(),
            PickerEvent::Confirm => self.on_confirm(),
            PickerEvent::Remove(item) => self.on_remove(&item),
            PickerEvent::Clear => self.on_clear(),
        }
    }

    pub fn on_query_change(&mut self, text: String) {
        trace!("query changed to {:?}", text);
        self.nav.set_query(text);
    }

    pub fn on_focus(&mut self) -> PickerNotice<T> {
        self.focused = true;
        PickerNotice::Focused
    }

    pub fn on_blur(&mut self) -> PickerNotice<T> {
        self.focused = false;
        PickerNotice::Blurred
    }

    pub fn on_move_down(&mut self) {
        self.nav.move_down();
        trace!("highlight counter {:?}", self.nav.highlight);
    }

    pub fn on_move_up(&mut self) {
        self.nav.move_up();
        trace!("highlight counter {:?}", self.nav.highlight);
    }

    /// Stop typing. The selection is untouched.
    pub fn on_escape(&mut self) -> Option<PickerNotice<T>> {
        self.nav.query.take().map(|_| PickerNotice::QueryCancelled)
    }

    /// Commit the active candidate, if there is one.
    pub fn on_confirm(&mut self) -> Option<PickerNotice<T>> {
        let item = self.active_candidate().cloned()?;

        match self.mode {
            SelectMode::Single => {
                self.selection = Selection::Single(item.clone());
                self.nav.cancel_query();
            }
            SelectMode::Multi => {
                if !self.selection.push(item.clone()) {
                    return None;
                }
                self.nav.reset_highlight();
                self.nav.cancel_query();
                self.invalidate_cache();
            }
        }

        debug!(
            "selection now holds {} item(s)",
            self.selection.items().len()
        );
        Some(PickerNotice::Selected(item))
    }

    pub fn on_remove(&mut self, item: &T) -> Option<PickerNotice<T>> {
        if !self.selection.remove(item) {
            return None;
        }
        self.invalidate_cache();
        debug!(
            "removed item, {} left in selection",
            self.selection.items().len()
        );
        Some(PickerNotice::Removed(item.clone()))
    }

    /// Empty the selection. The query is left alone.
    pub fn on_clear(&mut self) -> Option<PickerNotice<T>> {
        if self.selection.is_empty() {
            return None;
        }
        self.selection = self.mode.empty_selection();
        self.invalidate_cache();
        debug!("selection cleared");
        Some(PickerNotice::Cleared)
    }

    /// Current matches for the typed query, already ranked and cut.
    pub fn matches(&mut self) -> SearchResult<&T> {
        let indices = self.match_indices();
        indices.map(|i| &self.candidates[i])
    }

    /// Like [`Picker::matches`] but with scores and matched positions; `index`
    /// refers to [`Picker::candidates`]. Not cached.
    pub fn ranked(&self) -> SearchResult<Ranked<&T>> {
        let pool = filtered_indices(&self.candidates, &self.selection);
        search::ranked_items_with_cutoff(
            &self.config,
            self.query(),
            pool.iter().map(|&i| &self.candidates[i]),
        )
        .map(|mut ranked| {
            ranked.index = pool[ranked.index];
            ranked
        })
    }

    /// The candidate a confirm would commit right now.
    pub fn active_candidate(&mut self) -> Option<&T> {
        let indices = self.match_indices();
        resolve_active_candidate(&indices, self.nav.highlight).map(|&i| &self.candidates[i])
    }

    fn match_indices(&mut self) -> SearchResult<usize> {
        let Some(query) = query::prepare(&self.config.transform_query, self.query()) else {
            return SearchResult::NotSearched;
        };

        if let Some(hit) = self.cache.as_mut().and_then(|cache| cache.get(&query)) {
            trace!("match cache hit for {:?}", query);
            return SearchResult::ItemsFound(hit.clone());
        }

        let result = self.ranked().map(|ranked| ranked.index);
        if let (Some(cache), Some(indices)) = (self.cache.as_mut(), result.items()) {
            cache.put(query, indices.to_vec());
        }
        result
    }

    fn invalidate_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}
