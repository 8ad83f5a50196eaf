// Common test utilities for picker and matcher tests

use fuzzy_select::{Config, MatchSettings, Picker, SelectMode};

/// Builders for configs and pickers over plain string candidates
pub mod fixtures {
    use super::*;

    #[allow(dead_code)]
    pub fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Config that accepts every score
    #[allow(dead_code)]
    pub fn open_config(cutoff: Option<usize>) -> Config<String> {
        Config::for_text(MatchSettings {
            score_threshold: u32::MAX,
            cutoff,
            ..Default::default()
        })
    }

    #[allow(dead_code)]
    pub fn open_picker(mode: SelectMode, items: &[&str]) -> Picker<String> {
        Picker::new(open_config(None), mode, strings(items))
    }

    #[allow(dead_code)]
    pub fn fruits() -> Vec<String> {
        strings(&["Apple", "Banana", "Grape"])
    }
}

/// Helpers for reading picker state in assertions
pub mod inspect {
    use super::*;
    use fuzzy_select::SearchResult;

    #[allow(dead_code)]
    pub fn match_labels(picker: &mut Picker<String>) -> Option<Vec<String>> {
        match picker.matches() {
            SearchResult::NotSearched => None,
            SearchResult::ItemsFound(items) => Some(items.into_iter().cloned().collect()),
        }
    }

    #[allow(dead_code)]
    pub fn active_label(picker: &mut Picker<String>) -> Option<String> {
        picker.active_candidate().cloned()
    }
}
