// crates/scrabble-cli/src/persist.rs
//
// Snapshot files: pretty JSON named after the local time they were taken.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use scrabble_core::{Game, GameSnapshot};

pub fn snapshot_file_name(at: DateTime<Local>) -> String {
    format!("scrabble-{}.json", at.format("%Y%m%d-%H%M%S"))
}

/// Write `game` into `dir` and return the path written.
pub fn save_game(game: &Game, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(snapshot_file_name(Local::now()));
    let json = serde_json::to_string_pretty(&game.snapshot())?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn load_snapshot(path: &Path) -> Result<GameSnapshot> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a saved game", path.display()))?;
    Ok(snapshot)
}
