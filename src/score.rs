//! Score, line and level tracking

use crate::storage;
use std::path::Path;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing 1-4 lines at once, before the level multiplier
const LINE_CLEAR_POINTS: [u64; 4] = [100, 300, 500, 800];

/// Points for an `n`-line clear at `level`, or `None` outside 1-4 lines
pub fn line_clear_points(lines: u32, level: u32) -> Option<u64> {
    let base = match lines {
        1..=4 => LINE_CLEAR_POINTS[lines as usize - 1],
        _ => return None,
    };
    Some(base * level as u64)
}

/// Score, lines cleared and the high score carried across games
///
/// The level is never stored; it is always `1 + lines_cleared / 10`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u64,
    lines_cleared: u32,
    high_score: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        1 + self.lines_cleared / LINES_PER_LEVEL
    }

    /// Jump to a level by setting the line count it corresponds to
    pub fn set_level(&mut self, level: u32) {
        self.lines_cleared = level.saturating_sub(1).saturating_mul(LINES_PER_LEVEL);
    }

    /// Award a 1-4 line clear at the current level; anything else is ignored
    pub fn add_line_clear_score(&mut self, lines: u32) {
        if let Some(points) = line_clear_points(lines, self.level()) {
            self.score = self.score.saturating_add(points);
            self.lines_cleared = self.lines_cleared.saturating_add(lines);
        }
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop_score(&mut self, cells: u32) {
        self.score = self.score.saturating_add(cells as u64);
    }

    pub fn update_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    /// Start a new game; the high score is kept
    pub fn reset(&mut self) {
        self.score = 0;
        self.lines_cleared = 0;
    }

    /// Replace the high score with the one stored at `path` (0 if unreadable)
    pub fn load_from(&mut self, path: &Path) {
        self.high_score = storage::load_high_score(path);
    }

    /// Persist the high score to `path`, best effort
    pub fn save_to(&self, path: &Path) {
        storage::save_high_score(path, self.high_score);
    }
}
