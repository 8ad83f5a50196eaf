use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::{ConfigError, MatchSettings};
use crate::config_discovery;
use crate::picker::PickerEvent;

#[derive(Debug, Default, Parser)]
#[command(name = "fuzzy-select")]
#[command(version = "0.1.0")]
#[command(about = "Rank candidates against a fuzzy query and replay picker keystrokes")]
pub struct CliArgs {
    /// File with one candidate per line (reads stdin when omitted)
    pub candidates: Option<PathBuf>,

    /// Query typed into the picker
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// TOML config file (defaults to the user config, if present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Keep at most this many matches
    #[arg(long)]
    pub cutoff: Option<usize>,

    /// Exclusive upper bound on accepted scores
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Allow selecting several candidates
    #[arg(long, short = 'm')]
    pub multi: bool,

    /// Comma-separated key script, e.g. "down,down,enter,type=gr,enter"
    #[arg(long, short = 'k')]
    pub keys: Option<String>,

    /// Print scores next to matches
    #[arg(long, short = 's')]
    pub scores: bool,

    /// Print the final matches and selection as JSON
    #[arg(long)]
    pub json: bool,
}

impl CliArgs {
    /// Settings from the chosen config file with command-line overrides applied.
    pub fn load_settings(&self) -> Result<MatchSettings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => MatchSettings::from_file(path)?,
            None => config_discovery::load_user_settings()?,
        };

        if let Some(cutoff) = self.cutoff {
            settings.cutoff = Some(cutoff);
        }
        if let Some(threshold) = self.threshold {
            settings.score_threshold = threshold;
        }
        settings.validate()?;
        Ok(settings)
    }
}

pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

#[derive(Debug, Error, PartialEq)]
pub enum KeyScriptError {
    #[error("Unknown key '{0}'")]
    UnknownKey(String),
    #[error("Key '{0}' needs a value")]
    MissingValue(String),
}

/// Parse a key script into picker events.
pub fn parse_keys(script: &str) -> Result<Vec<PickerEvent<String>>, KeyScriptError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(parse_key)
        .collect()
}

fn parse_key(key: &str) -> Result<PickerEvent<String>, KeyScriptError> {
    if let Some((name, value)) = key.split_once('=') {
        return match name {
            "type" => Ok(PickerEvent::QueryChanged(value.to_string())),
            "remove" if value.is_empty() => Err(KeyScriptError::MissingValue(name.to_string())),
            "remove" => Ok(PickerEvent::Remove(value.to_string())),
            _ => Err(KeyScriptError::UnknownKey(name.to_string())),
        };
    }

    match key {
        "down" => Ok(PickerEvent::MoveDown),
        "up" => Ok(PickerEvent::MoveUp),
        "enter" | "tab" => Ok(PickerEvent::Confirm),
        "esc" => Ok(PickerEvent::Escape),
        "clear" => Ok(PickerEvent::Clear),
        "focus" => Ok(PickerEvent::Focus),
        "blur" => Ok(PickerEvent::Blur),
        "type" | "remove" => Err(KeyScriptError::MissingValue(key.to_string())),
        _ => Err(KeyScriptError::UnknownKey(key.to_string())),
    }
}

/// Non-empty lines, without trailing whitespace.
pub fn read_candidates(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut candidates = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if !line.is_empty() {
            candidates.push(line.to_string());
        }
    }
    Ok(candidates)
}

/// Bracket the graphemes at `positions`, e.g. `[A][p]ple`.
pub fn highlight(label: &str, positions: &[usize]) -> String {
    let mut out = String::with_capacity(label.len() + positions.len() * 2);
    for (idx, grapheme) in label.graphemes(true).enumerate() {
        if positions.binary_search(&idx).is_ok() {
            out.push('[');
            out.push_str(grapheme);
            out.push(']');
        } else {
            out.push_str(grapheme);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_no_args() {
        let args = CliArgs::parse_from(["fuzzy-select"]);
        assert!(args.candidates.is_none());
        assert!(args.query.is_none());
        assert!(!args.multi);
    }

    #[test]
    fn test_parse_full() {
        let args = CliArgs::parse_from([
            "fuzzy-select",
            "fruits.txt",
            "-q",
            "ap",
            "--cutoff",
            "2",
            "--threshold",
            "500",
            "-m",
            "-k",
            "down,enter",
        ]);
        assert_eq!(args.candidates, Some(PathBuf::from("fruits.txt")));
        assert_eq!(args.query.as_deref(), Some("ap"));
        assert_eq!(args.cutoff, Some(2));
        assert_eq!(args.threshold, Some(500));
        assert!(args.multi);
        assert_eq!(args.keys.as_deref(), Some("down,enter"));
    }

    #[test]
    fn test_load_settings_with_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "score_threshold = 100\ncutoff = 9\n").unwrap();

        let args = CliArgs {
            config: Some(path),
            cutoff: Some(3),
            ..Default::default()
        };
        let settings = args.load_settings().unwrap();
        assert_eq!(settings.score_threshold, 100);
        assert_eq!(settings.cutoff, Some(3));
    }

    #[test]
    fn test_load_settings_rejects_zero_cutoff() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let args = CliArgs {
            config: Some(path),
            cutoff: Some(0),
            ..Default::default()
        };
        assert!(matches!(args.load_settings(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_keys() {
        let events = parse_keys("down, up ,enter,tab,esc,clear,focus,blur,type=gr,remove=Apple").unwrap();
        assert_eq!(
            events,
            vec![
                PickerEvent::MoveDown,
                PickerEvent::MoveUp,
                PickerEvent::Confirm,
                PickerEvent::Confirm,
                PickerEvent::Escape,
                PickerEvent::Clear,
                PickerEvent::Focus,
                PickerEvent::Blur,
                PickerEvent::QueryChanged("gr".to_string()),
                PickerEvent::Remove("Apple".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_keys_allows_empty_query() {
        assert_eq!(
            parse_keys("type=").unwrap(),
            vec![PickerEvent::QueryChanged(String::new())]
        );
        assert_eq!(parse_keys("").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_keys_errors() {
        assert_eq!(
            parse_keys("down,jump"),
            Err(KeyScriptError::UnknownKey("jump".to_string()))
        );
        assert_eq!(
            parse_keys("remove"),
            Err(KeyScriptError::MissingValue("remove".to_string()))
        );
        assert_eq!(
            parse_keys("remove="),
            Err(KeyScriptError::MissingValue("remove".to_string()))
        );
    }

    #[test]
    fn test_read_candidates() {
        let input = "Apple\n\nBanana  \nGrape\n";
        let candidates = read_candidates(input.as_bytes()).unwrap();
        assert_eq!(candidates, vec!["Apple", "Banana", "Grape"]);
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("Apple", &[0, 1]), "[A][p]ple");
        assert_eq!(highlight("Cafe\u{301}", &[3]), "Caf[e\u{301}]");
        assert_eq!(highlight("Grape", &[]), "Grape");
    }
}
