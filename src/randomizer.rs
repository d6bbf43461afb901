//! Piece generation
//!
//! The default randomizer draws every piece independently and uniformly.
//! The "bag" randomizer shuffles all 7 pieces and deals them out before
//! reshuffling, which prevents long droughts.

use crate::piece::{DEFAULT_SPAWN_COL, Piece};
use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How the next piece type is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag,
}

/// Produces new pieces at a fixed spawn column
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: ChaCha8Rng,
    mode: Randomizer,
    /// Remaining pieces of the current bag (bag mode only)
    bag: VecDeque<TetrominoType>,
    spawn_col: i32,
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceFactory {
    /// Uniform factory seeded from the OS
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy(), Randomizer::Uniform)
    }

    /// Deterministic uniform factory
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed), Randomizer::Uniform)
    }

    fn from_rng(rng: ChaCha8Rng, mode: Randomizer) -> Self {
        Self {
            rng,
            mode,
            bag: VecDeque::with_capacity(TetrominoType::ALL.len()),
            spawn_col: DEFAULT_SPAWN_COL,
        }
    }

    pub fn with_mode(mut self, mode: Randomizer) -> Self {
        self.mode = mode;
        self.bag.clear();
        self
    }

    pub fn with_spawn_col(mut self, spawn_col: i32) -> Self {
        self.spawn_col = spawn_col;
        self
    }

    pub fn mode(&self) -> Randomizer {
        self.mode
    }

    pub fn spawn_col(&self) -> i32 {
        self.spawn_col
    }

    /// Get the next piece type
    pub fn next_type(&mut self) -> TetrominoType {
        match self.mode {
            Randomizer::Uniform => {
                TetrominoType::ALL[self.rng.gen_range(0..TetrominoType::ALL.len())]
            }
            Randomizer::Bag => {
                if self.bag.is_empty() {
                    self.refill();
                }
                self.bag.pop_front().unwrap_or(TetrominoType::I)
            }
        }
    }

    /// Get the next piece, placed at the spawn position
    pub fn next_piece(&mut self) -> Piece {
        let piece_type = self.next_type();
        Piece::spawn_at(piece_type, self.spawn_col)
    }

    /// Refill with a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::ALL;
        new_bag.shuffle(&mut self.rng);
        self.bag.extend(new_bag);
    }
}
