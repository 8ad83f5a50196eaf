use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::fuzzy::Penalties;
use crate::query::{self, QueryPolicy, QueryTransform};

/// Default exclusive upper bound on accepted scores.
pub const DEFAULT_SCORE_THRESHOLD: u32 = 2_000;
/// Default number of cached query results per picker.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Invalid config format: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Data half of the configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchSettings {
    /// A candidate matches iff its score is strictly below this value.
    pub score_threshold: u32,
    /// Keep at most this many ranked matches. `None` keeps all.
    pub cutoff: Option<usize>,
    pub penalties: Penalties,
    pub separators: Vec<char>,
    pub query: QueryPolicy,
    /// Zero disables the picker's match cache.
    pub cache_capacity: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            cutoff: None,
            penalties: Penalties::default(),
            separators: Vec::new(),
            query: QueryPolicy::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl MatchSettings {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: MatchSettings =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cutoff == Some(0) {
            return Err(ConfigError::Invalid(
                "cutoff must be at least 1; omit it to keep every match".to_string(),
            ));
        }
        Ok(())
    }
}

/// Textual representation of a candidate used for scoring.
pub type LabelFn<T> = Box<dyn Fn(&T) -> String>;

/// Per-instance configuration. Immutable once handed to a picker.
pub struct Config<T> {
    pub settings: MatchSettings,
    pub transform_query: QueryTransform,
    pub to_label: LabelFn<T>,
}

impl<T> Config<T> {
    /// Build a config whose query transform follows `settings.query`.
    pub fn new(settings: MatchSettings, to_label: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            transform_query: query::from_policy(&settings.query),
            settings,
            to_label: Box::new(to_label),
        }
    }

    pub fn label(&self, item: &T) -> String {
        (self.to_label)(item)
    }
}

impl<T: AsRef<str> + 'static> Config<T> {
    /// Config for candidates that are their own label.
    pub fn for_text(settings: MatchSettings) -> Self {
        Self::new(settings, |item: &T| item.as_ref().to_string())
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = MatchSettings::default();
        assert_eq!(settings.score_threshold, 2_000);
        assert_eq!(settings.cutoff, None);
        assert!(settings.separators.is_empty());
        assert_eq!(settings.cache_capacity, DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = MatchSettings::from_toml(
            r#"
            cutoff = 5
            separators = [" ", "-"]

            [penalties]
            move_penalty = 50
            "#,
        )
        .unwrap();

        assert_eq!(settings.cutoff, Some(5));
        assert_eq!(settings.separators, vec![' ', '-']);
        assert_eq!(settings.penalties.move_penalty, Some(50));
        assert_eq!(settings.penalties.add_penalty, None);
        assert_eq!(settings.score_threshold, DEFAULT_SCORE_THRESHOLD);
    }

    #[test]
    fn test_zero_cutoff_rejected() {
        let err = MatchSettings::from_toml("cutoff = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = MatchSettings::from_toml("score_threshold = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "score_threshold = 100\n[query]\nmin_length = 2\ntrim = true\n").unwrap();

        let settings = MatchSettings::from_file(&path).unwrap();
        assert_eq!(settings.score_threshold, 100);
        assert_eq!(settings.query.min_length, 2);
        assert!(settings.query.trim);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = MatchSettings::from_file(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_config_follows_query_policy() {
        let settings = MatchSettings {
            query: QueryPolicy {
                min_length: 3,
                trim: false,
            },
            ..Default::default()
        };
        let config: Config<String> = Config::for_text(settings);
        assert_eq!((config.transform_query)("ab"), None);
        assert_eq!(config.label(&"Apple".to_string()), "Apple");
    }
}
