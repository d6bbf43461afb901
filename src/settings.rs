//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetrs-engine/settings.toml (or platform
//! equivalent). Every section falls back to defaults field by field.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, MIN_BOARD_SIZE};
use crate::piece::DEFAULT_SPAWN_COL;
use crate::randomizer::Randomizer;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when no platform data directory is available
const FALLBACK_SCORE_FILE: &str = "tetrs_engine_scores.json";

/// Engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardSettings,
    pub gameplay: GameplaySettings,
    pub storage: StorageSettings,
}

/// Board dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub width: usize,
    pub height: usize,
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Anchor column for newly spawned pieces
    pub spawn_col: i32,
    /// "uniform" or "bag"
    pub randomizer: Randomizer,
    /// Fixed seed for reproducible piece sequences
    pub seed: Option<u64>,
}

/// Where the high score lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub high_score_file: Option<PathBuf>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            spawn_col: DEFAULT_SPAWN_COL,
            randomizer: Randomizer::Uniform,
            seed: None,
        }
    }
}

impl Settings {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "tetrs", "tetrs-engine")
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from the platform config dir, or defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file, or defaults if missing or malformed
    pub fn load_from(path: &Path) -> Self {
        let settings = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        settings.sanitized()
    }

    /// Save settings to the platform config dir
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };
        self.save_to(&path)
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }

    /// Clamp values the engine can't work with
    pub fn sanitized(mut self) -> Self {
        self.board.width = self.board.width.max(MIN_BOARD_SIZE);
        self.board.height = self.board.height.max(MIN_BOARD_SIZE);
        // Widest spawn shape is the I piece, 4 columns from the anchor
        let max_col = (self.board.width - 4) as i32;
        self.gameplay.spawn_col = self.gameplay.spawn_col.clamp(0, max_col);
        self
    }

    /// High score file: configured path, else the platform data dir
    pub fn high_score_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.high_score_file {
            return path.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("scores.json"))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_SCORE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.board.width, 10);
        assert_eq!(settings.board.height, 20);
        assert_eq!(settings.gameplay.spawn_col, 3);
        assert_eq!(settings.gameplay.randomizer, Randomizer::Uniform);
        assert_eq!(settings.gameplay.seed, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [board]
            width = 12

            [gameplay]
            randomizer = "bag"
            seed = 99
            "#,
        )
        .unwrap();
        assert_eq!(settings.board.width, 12);
        assert_eq!(settings.board.height, 20);
        assert_eq!(settings.gameplay.spawn_col, 3);
        assert_eq!(settings.gameplay.randomizer, Randomizer::Bag);
        assert_eq!(settings.gameplay.seed, Some(99));
    }

    #[test]
    fn test_sanitized_clamps() {
        let mut settings = Settings::default();
        settings.board.width = 2;
        settings.board.height = 0;
        settings.gameplay.spawn_col = 40;
        let settings = settings.sanitized();
        assert_eq!(settings.board.width, 4);
        assert_eq!(settings.board.height, 4);
        assert_eq!(settings.gameplay.spawn_col, 0);

        let mut settings = Settings::default();
        settings.gameplay.spawn_col = -3;
        assert_eq!(settings.sanitized().gameplay.spawn_col, 0);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("tetrs-engine-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");

        let mut settings = Settings::default();
        settings.board.width = 14;
        settings.gameplay.spawn_col = 5;
        settings.storage.high_score_file = Some(dir.join("hs.json"));
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded, settings);
        assert_eq!(loaded.high_score_path(), dir.join("hs.json"));

        fs::write(&path, "[board\nwidth = ").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("tetrs-engine-no-such-settings.toml");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
