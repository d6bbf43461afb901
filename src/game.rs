//! Core game state and logic
//!
//! [`Game`] owns the board, the score tracker and the current/next pieces,
//! and drives spawn → fall → lock → clear → respawn. Every public operation
//! runs to completion before returning; a host that calls it from several
//! threads must wrap the whole `Game` in a lock.

use crate::board::Board;
use crate::collision::CollisionDetector;
use crate::piece::Piece;
use crate::randomizer::PieceFactory;
use crate::score::ScoreTracker;
use crate::settings::Settings;
use crate::tetromino::RotationDirection;
use std::time::Duration;

/// Fall interval at level 1, in milliseconds
pub const BASE_DROP_MS: u64 = 1000;
/// How much faster each level falls, in milliseconds
pub const DROP_STEP_MS: u64 = 100;
/// Fastest fall interval, in milliseconds
pub const MIN_DROP_MS: u64 = 50;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCW,
    RotateCCW,
    /// Toggles between playing and paused
    Pause,
}

/// Fall interval for a level: 1000ms at level 1, 100ms faster per level,
/// never below 50ms
pub fn drop_speed_ms(level: u32) -> u64 {
    let speedup = u64::from(level.saturating_sub(1)) * DROP_STEP_MS;
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// Score tracking
    pub score: ScoreTracker,
    /// Current falling piece
    pub current_piece: Option<Piece>,
    /// Preview of the piece that spawns next
    pub next_piece: Option<Piece>,
    state: GameState,
    factory: PieceFactory,
    spawn_col: i32,
    /// Time accumulated towards the next gravity step
    fall_elapsed: Duration,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard 10x20 game with a random piece sequence
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    /// Standard game with a reproducible piece sequence
    pub fn with_seed(seed: u64) -> Self {
        let mut settings = Settings::default();
        settings.gameplay.seed = Some(seed);
        Self::with_settings(&settings)
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let factory = match settings.gameplay.seed {
            Some(seed) => PieceFactory::with_seed(seed),
            None => PieceFactory::new(),
        }
        .with_mode(settings.gameplay.randomizer)
        .with_spawn_col(settings.gameplay.spawn_col);

        Self {
            board: Board::new(settings.board.width, settings.board.height),
            score: ScoreTracker::new(),
            current_piece: None,
            next_piece: None,
            state: GameState::Start,
            factory,
            spawn_col: settings.gameplay.spawn_col,
            fall_elapsed: Duration::ZERO,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn current_level(&self) -> u32 {
        self.score.level()
    }

    pub fn final_score(&self) -> u64 {
        self.score.score()
    }

    /// START → PLAYING, dealing the first current and next pieces
    pub fn start(&mut self) {
        if self.state != GameState::Start {
            return;
        }
        self.state = GameState::Playing;
        self.fall_elapsed = Duration::ZERO;
        self.next_piece = Some(self.factory.next_piece());
        self.spawn_next_piece();
        tracing::debug!("game started");
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Playing {
            self.state = GameState::Paused;
            tracing::debug!("game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Playing;
            tracing::debug!("game resumed");
        }
    }

    /// Force GAME_OVER and record the high score
    pub fn end_game(&mut self) {
        self.state = GameState::GameOver;
        self.score.update_high_score();
        tracing::info!(
            "game over: score={} lines={} level={} high_score={}",
            self.score.score(),
            self.score.lines_cleared(),
            self.score.level(),
            self.score.high_score()
        );
    }

    /// Promote the next piece to current at the spawn position and deal a new next piece
    pub fn spawn_next_piece(&mut self) {
        let mut piece = self
            .next_piece
            .take()
            .unwrap_or_else(|| self.factory.next_piece());
        piece.reset_to_spawn(self.spawn_col);
        tracing::debug!("spawned {} at ({}, {})", piece.piece_type, piece.row, piece.col);
        self.current_piece = Some(piece);
        self.next_piece = Some(self.factory.next_piece());
    }

    /// Make sure a current piece exists and fits; ends the game if it doesn't
    pub fn try_spawn_piece(&mut self) -> bool {
        if self.current_piece.is_none() {
            self.spawn_next_piece();
        }

        let detector = CollisionDetector::new(&self.board);
        let fits = self
            .current_piece
            .as_ref()
            .is_some_and(|piece| detector.is_valid_move(piece, piece.row, piece.col));

        if !fits {
            tracing::debug!("no room to spawn");
            self.end_game();
        }
        fits
    }

    /// Commit the current piece to the board, clear full lines and score them
    ///
    /// Returns the number of lines cleared. The caller spawns the next piece.
    pub fn lock_current_piece(&mut self) -> usize {
        let Some(piece) = self.current_piece.take() else {
            return 0;
        };

        let positions = piece.block_positions();
        self.board.lock_piece(&positions, piece.color());
        tracing::debug!("locked {} at {:?}", piece.piece_type, positions);

        let complete = self.board.complete_lines();
        if complete.is_empty() {
            return 0;
        }

        let cleared = self.board.clear_lines(&complete);
        let level = self.score.level();
        self.score.add_line_clear_score(cleared as u32);
        tracing::info!(
            "cleared {} line(s) at level {}: score={}",
            cleared,
            level,
            self.score.score()
        );
        cleared
    }

    /// GAME_OVER once blocks reach the top row
    pub fn check_game_over(&mut self) -> bool {
        if self.board.is_game_over() {
            self.end_game();
        }
        self.state == GameState::GameOver
    }

    /// Milliseconds between gravity steps at the current level
    pub fn drop_speed(&self) -> u64 {
        drop_speed_ms(self.score.level())
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.drop_speed())
    }

    /// Back to START with an empty board and score; the high score is kept
    pub fn reset(&mut self) {
        self.state = GameState::Start;
        self.board.reset();
        self.score.reset();
        self.current_piece = None;
        self.next_piece = None;
        self.fall_elapsed = Duration::ZERO;
        tracing::debug!("game reset");
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match self.state {
            GameState::Start | GameState::GameOver => {
                // No actions, handled by the host
            }
            GameState::Paused => {
                if action == Action::Pause {
                    self.resume();
                }
            }
            GameState::Playing => match action {
                Action::MoveLeft => self.move_left(),
                Action::MoveRight => self.move_right(),
                Action::SoftDrop => self.soft_drop(),
                Action::HardDrop => self.hard_drop(),
                Action::RotateCW => self.rotate(RotationDirection::Clockwise),
                Action::RotateCCW => self.rotate(RotationDirection::CounterClockwise),
                Action::Pause => self.pause(),
            },
        }
    }

    /// Advance host time; runs one gravity step per elapsed drop interval
    ///
    /// Returns the number of steps taken. Time only accumulates while playing.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if self.state != GameState::Playing {
            return 0;
        }

        self.fall_elapsed += elapsed;
        let mut steps = 0;
        while self.state == GameState::Playing {
            let interval = self.drop_interval();
            if self.fall_elapsed < interval {
                break;
            }
            self.fall_elapsed -= interval;
            self.step();
            steps += 1;
        }
        steps
    }

    /// One gravity tick: fall a row, or lock and bring in the next piece
    pub fn step(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        let Some(piece) = &mut self.current_piece else {
            self.try_spawn_piece();
            return;
        };

        if CollisionDetector::new(&self.board).can_move_down(piece) {
            piece.move_down();
        } else {
            self.settle();
        }
    }

    /// Lock the current piece and spawn the next unless the game ended
    fn settle(&mut self) {
        self.lock_current_piece();
        if self.check_game_over() {
            return;
        }
        self.try_spawn_piece();
    }

    fn move_left(&mut self) {
        if let Some(piece) = &mut self.current_piece {
            if CollisionDetector::new(&self.board).can_move_left(piece) {
                piece.move_left();
            }
        }
    }

    fn move_right(&mut self) {
        if let Some(piece) = &mut self.current_piece {
            if CollisionDetector::new(&self.board).can_move_right(piece) {
                piece.move_right();
            }
        }
    }

    fn soft_drop(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        if CollisionDetector::new(&self.board).can_move_down(piece) {
            piece.move_down();
            self.score.add_soft_drop_score(1);
            self.fall_elapsed = Duration::ZERO;
        } else {
            self.settle();
        }
    }

    fn hard_drop(&mut self) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        let distance = CollisionDetector::new(&self.board).drop_distance(piece);
        piece.row += distance;
        self.fall_elapsed = Duration::ZERO;
        self.settle();
    }

    /// Rotate in place if allowed, otherwise through the first wall kick that fits
    fn rotate(&mut self, direction: RotationDirection) {
        let Some(piece) = &mut self.current_piece else {
            return;
        };
        let detector = CollisionDetector::new(&self.board);
        if detector.can_rotate_in(piece, direction) {
            piece.rotate(direction);
        } else if let Some(offset) = detector.wall_kick_offset_in(piece, direction) {
            piece.translate(offset);
            piece.rotate(direction);
        }
    }
}
