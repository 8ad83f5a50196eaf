// src/config_discovery.rs - Where the user's matcher settings live

use log::debug;
use std::path::PathBuf;

use crate::config::{ConfigError, MatchSettings};

pub const APP_NAME: &str = "fuzzy-select";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Config locations in lookup order: the platform config dir, then a dot
/// directory in the user's home.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_NAME).join(CONFIG_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}", APP_NAME)).join(CONFIG_FILE_NAME));
    }
    paths
}

/// First existing user config file, if any.
pub fn find_config_file() -> Option<PathBuf> {
    first_existing(config_search_paths())
}

fn first_existing(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|p| p.is_file())
}

/// Settings from the first user config found, defaults when there is none.
pub fn load_user_settings() -> Result<MatchSettings, ConfigError> {
    load_first(config_search_paths())
}

fn load_first(paths: impl IntoIterator<Item = PathBuf>) -> Result<MatchSettings, ConfigError> {
    match first_existing(paths) {
        Some(path) => {
            debug!("loading settings from {}", path.display());
            MatchSettings::from_file(&path)
        }
        None => Ok(MatchSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_search_paths_end_in_config_file() {
        for path in config_search_paths() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
            assert!(path.parent().is_some_and(|dir| dir.ends_with(APP_NAME)
                || dir.ends_with(format!(".{}", APP_NAME))));
        }
    }

    #[test]
    fn test_first_existing_skips_missing_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        let dir = temp_dir.path().join("dir.toml");
        fs::create_dir(&dir).unwrap();
        let present = temp_dir.path().join("config.toml");
        fs::write(&present, "").unwrap();

        assert_eq!(
            first_existing([missing, dir, present.clone()]),
            Some(present)
        );
    }

    #[test]
    fn test_load_first_prefers_earlier_path() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.toml");
        let second = temp_dir.path().join("second.toml");
        fs::write(&first, "score_threshold = 100\n").unwrap();
        fs::write(&second, "score_threshold = 200\n").unwrap();

        let settings = load_first([first, second]).unwrap();
        assert_eq!(settings.score_threshold, 100);
    }

    #[test]
    fn test_load_first_defaults_when_nothing_found() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_first([temp_dir.path().join("none.toml")]).unwrap();
        assert_eq!(settings, MatchSettings::default());
    }

    #[test]
    fn test_load_first_reports_bad_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "cutoff = 0\n").unwrap();

        assert!(matches!(load_first([path]), Err(ConfigError::Invalid(_))));
    }
}
