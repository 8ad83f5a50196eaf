use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader};

use fuzzy_select::cli::{self, highlight};
use fuzzy_select::{
    Config, Picker, PickerNotice, Ranked, SearchResult, SelectMode, Selection,
    resolve_active_candidate,
};

#[derive(Serialize)]
struct Report<'a> {
    query: Option<&'a str>,
    matches: &'a SearchResult<Ranked<&'a String>>,
    active: Option<usize>,
    selection: &'a Selection<String>,
}

/// Load candidates, type the query, replay the key script, then print the
/// ranked matches and the resulting selection.
fn main() -> Result<()> {
    let args = cli::parse_args();

    // Initialize logger (set RUST_LOG env var to control verbosity)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = args.load_settings().context("Failed to load config")?;

    let candidates = match &args.candidates {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open candidates '{}'", path.display()))?;
            cli::read_candidates(BufReader::new(file))?
        }
        None => cli::read_candidates(io::stdin().lock())?,
    };
    log::debug!("loaded {} candidates", candidates.len());

    let events = match &args.keys {
        Some(script) => cli::parse_keys(script)?,
        None => Vec::new(),
    };

    let mode = if args.multi {
        SelectMode::Multi
    } else {
        SelectMode::Single
    };
    let mut picker = Picker::new(Config::for_text(settings), mode, candidates);

    if let Some(query) = &args.query {
        picker.on_query_change(query.clone());
    }

    for event in events {
        if let Some(notice) = picker.handle_event(event)
            && !args.json
        {
            println!("{}", describe(&notice));
        }
    }

    let ranked = picker.ranked();
    let active = resolve_active_candidate(&ranked, picker.navigation().highlight).map(|r| r.index);

    if args.json {
        let report = Report {
            query: picker.query(),
            matches: &ranked,
            active,
            selection: picker.selection(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &ranked {
        SearchResult::NotSearched => println!("(no search)"),
        SearchResult::ItemsFound(items) if items.is_empty() => println!("(no matches)"),
        SearchResult::ItemsFound(items) => {
            for entry in items {
                let marker = if Some(entry.index) == active { '>' } else { ' ' };
                let label = highlight(entry.item, &entry.positions);
                if args.scores {
                    println!("{} {} ({})", marker, label, entry.score);
                } else {
                    println!("{} {}", marker, label);
                }
            }
        }
    }

    match picker.selection() {
        Selection::None => println!("selection: none"),
        Selection::Single(item) => println!("selection: {}", item),
        Selection::Many(items) => println!("selection: [{}]", items.join(", ")),
    }

    Ok(())
}

fn describe(notice: &PickerNotice<String>) -> String {
    match notice {
        PickerNotice::Focused => "focused".to_string(),
        PickerNotice::Blurred => "blurred".to_string(),
        PickerNotice::Selected(item) => format!("selected {}", item),
        PickerNotice::Removed(item) => format!("removed {}", item),
        PickerNotice::Cleared => "cleared".to_string(),
        PickerNotice::QueryCancelled => "query cancelled".to_string(),
    }
}
