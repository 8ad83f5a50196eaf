// src/query.rs - Query gate and normalization ahead of the matcher
//
// A transform returning `None` means "do not search", distinct from a search
// that found nothing.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Host-supplied gate/normalizer for raw query text.
pub type QueryTransform = Box<dyn Fn(&str) -> Option<String>>;

/// Declarative form of the common transforms, loadable from config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryPolicy {
    /// Minimum number of graphemes before a search runs.
    pub min_length: usize,
    /// Strip surrounding whitespace before measuring and matching.
    pub trim: bool,
}

/// Pass every query through unchanged.
pub fn identity() -> QueryTransform {
    Box::new(|query| Some(query.to_string()))
}

/// Suppress the search until the query has at least `min` graphemes.
pub fn min_length(min: usize) -> QueryTransform {
    Box::new(move |query| (query.graphemes(true).count() >= min).then(|| query.to_string()))
}

/// Trim whitespace, then hand the result to `inner`.
pub fn trimmed(inner: QueryTransform) -> QueryTransform {
    Box::new(move |query| inner(query.trim()))
}

/// Build the transform described by a [`QueryPolicy`].
pub fn from_policy(policy: &QueryPolicy) -> QueryTransform {
    let gate = min_length(policy.min_length);
    if policy.trim { trimmed(gate) } else { gate }
}

/// Run the gate. `None` in, or `None` out of the transform, means no search.
pub fn prepare(transform: &QueryTransform, raw: Option<&str>) -> Option<String> {
    raw.and_then(|query| transform(query))
}
