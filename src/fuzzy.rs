// src/fuzzy.rs - Penalty-based fuzzy scoring of a query against a candidate label

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

// ===== DEFAULT WEIGHTS =====

// Candidate unit that the query never asked for
pub const DEFAULT_ADD_PENALTY: u32 = 10;
// Query unit missing from the candidate
pub const DEFAULT_REMOVE_PENALTY: u32 = 10_000;
// Query unit found before the previous match
pub const DEFAULT_MOVE_PENALTY: u32 = 1_000;
// Each candidate unit skipped between two in-order matches
pub const DEFAULT_INSERT_PENALTY: u32 = 1;

/// Optional penalty weights. Unset categories fall back to the engine defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Penalties {
    pub add_penalty: Option<u32>,
    pub remove_penalty: Option<u32>,
    pub move_penalty: Option<u32>,
    pub insert_penalty: Option<u32>,
}

impl Penalties {
    /// Resolve every category to a concrete weight.
    pub fn weights(&self) -> Weights {
        Weights {
            add: self.add_penalty.unwrap_or(DEFAULT_ADD_PENALTY),
            remove: self.remove_penalty.unwrap_or(DEFAULT_REMOVE_PENALTY),
            moves: self.move_penalty.unwrap_or(DEFAULT_MOVE_PENALTY),
            insert: self.insert_penalty.unwrap_or(DEFAULT_INSERT_PENALTY),
        }
    }
}

/// Fully resolved penalty weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub add: u32,
    pub remove: u32,
    pub moves: u32,
    pub insert: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Penalties::default().weights()
    }
}

/// Result of scoring one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatch {
    /// Lower is better, zero is an exact match.
    pub score: u32,
    /// Grapheme indices in the label that the query aligned with, ascending.
    pub positions: Vec<usize>,
}

// ===== TOKENIZATION =====

/// A run of folded graphemes, either a word or a single separator.
#[derive(Debug)]
struct Token<'a> {
    start: usize,
    units: &'a [String],
}

fn fold(text: &str) -> Vec<String> {
    text.graphemes(true).map(|g| g.to_lowercase()).collect()
}

fn is_separator(unit: &str, separators: &[char]) -> bool {
    let mut chars = unit.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => separators.contains(&c),
        _ => false,
    }
}

/// Split folded units into word tokens and single-unit separator tokens.
fn dissect<'a>(units: &'a [String], separators: &[char]) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut word_start = 0;

    for (idx, unit) in units.iter().enumerate() {
        if is_separator(unit, separators) {
            if word_start < idx {
                tokens.push(Token {
                    start: word_start,
                    units: &units[word_start..idx],
                });
            }
            tokens.push(Token {
                start: idx,
                units: &units[idx..idx + 1],
            });
            word_start = idx + 1;
        }
    }

    if word_start < units.len() {
        tokens.push(Token {
            start: word_start,
            units: &units[word_start..],
        });
    }

    tokens
}

// ===== CORE ALGORITHM =====

fn times(weight: u32, count: usize) -> u32 {
    weight.saturating_mul(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Distance between one needle token and one hay token.
///
/// Every needle unit claims the first unclaimed equal unit of the hay, so
/// out-of-order matches are still found and then charged as moves.
fn distance(weights: &Weights, needle: &[String], hay: &[String]) -> (u32, Vec<usize>) {
    let mut claimed = vec![false; hay.len()];
    let mut matched = Vec::with_capacity(needle.len());

    for unit in needle {
        if let Some(idx) = (0..hay.len()).find(|&i| !claimed[i] && hay[i] == *unit) {
            claimed[idx] = true;
            matched.push(idx);
        }
    }

    let mut score = 0u32;
    let mut prev: isize = -1;
    for &idx in &matched {
        let idx = idx as isize;
        let cost = if idx < prev {
            weights.moves
        } else {
            times(weights.insert, (idx - prev - 1) as usize)
        };
        score = score.saturating_add(cost);
        prev = idx;
    }

    score = score
        .saturating_add(times(weights.add, hay.len() - matched.len()))
        .saturating_add(times(weights.remove, needle.len() - matched.len()));

    matched.sort_unstable();
    (score, matched)
}

fn is_boundary(token: &Token, separators: &[char]) -> bool {
    matches!(token.units, [unit] if is_separator(unit, separators))
}

/// Score `query` against `label` and report which label graphemes matched.
///
/// Both strings are case-folded. With separators configured, each query word
/// is aligned with a single label word, so the rest of the label costs
/// nothing and matches at word starts beat matches in the middle of a word.
/// Separators at either end of the query delimit nothing and are ignored.
/// A query with more words than the label is aligned as a whole.
pub fn match_label(query: &str, label: &str, weights: &Weights, separators: &[char]) -> LabelMatch {
    let needle_units = fold(query);
    let hay_units = fold(label);

    let mut needles = dissect(&needle_units, separators);
    let lead = needles
        .iter()
        .take_while(|t| is_boundary(t, separators))
        .count();
    needles.drain(..lead);
    while needles.last().is_some_and(|t| is_boundary(t, separators)) {
        needles.pop();
    }
    if needles.is_empty() {
        needles.push(Token {
            start: 0,
            units: &[],
        });
    }

    let mut hays = dissect(&hay_units, separators);
    if needles.len() > 1 && needles.len() > hays.len() {
        let start = needles[0].start;
        let end = needles
            .last()
            .map_or(start, |t| t.start + t.units.len());
        needles = vec![Token {
            start,
            units: &needle_units[start..end],
        }];
        hays = vec![Token {
            start: 0,
            units: &hay_units,
        }];
    }

    let mut total = 0u32;
    let mut positions = Vec::new();

    for (i, needle) in needles.iter().enumerate() {
        // Later query words may only align with later label words.
        let window: &[Token] = if needles.len() > 1 {
            let end = hays.len() + i + 1 - needles.len();
            &hays[i..end]
        } else {
            &hays
        };

        let best = window
            .iter()
            .map(|hay| {
                let (score, matched) = distance(weights, needle.units, hay.units);
                (score, matched, hay.start)
            })
            .min_by_key(|(score, _, _)| *score);

        match best {
            Some((score, matched, offset)) => {
                total = total.saturating_add(score);
                positions.extend(matched.into_iter().map(|p| p + offset));
            }
            // Empty label: every query unit is missing.
            None => {
                total = total.saturating_add(times(weights.remove, needle.units.len()));
            }
        }
    }

    positions.sort_unstable();
    positions.dedup();

    LabelMatch {
        score: total,
        positions,
    }
}

/// Score `query` against `label`; lower is better.
pub fn score(query: &str, label: &str, penalties: &Penalties, separators: &[char]) -> u32 {
    match_label(query, label, &penalties.weights(), separators).score
}
