//! High score persistence
//!
//! The record is a small JSON object, `{"high_score": 1234}`. Loading never
//! fails (anything unreadable counts as 0) and saving is best effort: the new
//! contents go to a temp file that is renamed over the old one, so a failed
//! save leaves the previous record intact.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// Read the stored high score, 0 if missing or unreadable
pub fn load_high_score(path: &Path) -> u64 {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("no high score file at {}", path.display());
            return 0;
        }
        Err(e) => {
            tracing::warn!("could not read high score file {}: {}", path.display(), e);
            return 0;
        }
    };

    match serde_json::from_str::<HighScoreRecord>(&contents) {
        Ok(record) => record.high_score,
        Err(e) => {
            tracing::warn!("ignoring malformed high score file {}: {}", path.display(), e);
            0
        }
    }
}

/// Store the high score, logging and swallowing any failure
pub fn save_high_score(path: &Path, high_score: u64) {
    if let Err(e) = try_save_high_score(path, high_score) {
        tracing::warn!("{}", e);
    }
}

/// Store the high score, reporting what went wrong
pub fn try_save_high_score(path: &Path, high_score: u64) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    }

    let contents = serde_json::to_string_pretty(&HighScoreRecord { high_score })
        .map_err(|e| format!("Failed to serialize high score: {}", e))?;

    let tmp = temp_path(path);
    if let Err(e) = write_synced(&tmp, contents.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(format!("Failed to write {}: {}", tmp.display(), e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(format!("Failed to replace {}: {}", path.display(), e));
    }

    tracing::debug!("saved high score {} to {}", high_score, path.display());
    Ok(())
}

/// Write and flush to disk so the rename never lands ahead of the data
fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "high_score".into());
    name.push(".tmp");
    path.with_file_name(name)
}
