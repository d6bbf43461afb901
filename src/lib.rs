//! TETRS engine - the rules of a falling-block puzzle, without a screen
//!
//! A fixed-size [`Board`], the seven [`TetrominoType`]s with table-driven
//! rotation, a [`CollisionDetector`] with wall kicks, a [`ScoreTracker`]
//! and the [`Game`] state machine that ties them together. Rendering and
//! input belong to the host: it reads [`Board::get_cell`],
//! [`Piece::block_positions`] and the score getters, and feeds
//! [`Action`]s and elapsed time back in.

pub mod board;
pub mod collision;
pub mod game;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod storage;
pub mod tetromino;

pub use board::{Board, Cell};
pub use collision::CollisionDetector;
pub use game::{Action, Game, GameState};
pub use piece::Piece;
pub use randomizer::{PieceFactory, Randomizer};
pub use score::ScoreTracker;
pub use settings::Settings;
pub use tetromino::{Color, InvalidPieceType, Rotation, RotationDirection, TetrominoType};
