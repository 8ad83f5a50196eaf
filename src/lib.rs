// lib.rs - Library root for fuzzy-select

pub mod cli;
pub mod config;
pub mod config_discovery;
pub mod fuzzy;
pub mod navigation;
pub mod picker;
pub mod query;
pub mod search;
pub mod selection;

pub use config::{Config, ConfigError, MatchSettings};
pub use fuzzy::Penalties;
pub use navigation::{NavigationState, non_negative_remainder, resolve_active_candidate};
pub use picker::{Picker, PickerEvent, PickerNotice};
pub use search::{
    Ranked, SearchResult, matched_items, matched_items_with_cutoff, ranked_items,
    ranked_items_with_cutoff,
};
pub use selection::{SelectMode, Selection, filtered_candidates};
