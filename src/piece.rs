//! Active falling piece

use crate::tetromino::{Color, Rotation, RotationDirection, TetrominoType};

/// Anchor column new pieces spawn at on a standard 10-wide board
pub const DEFAULT_SPAWN_COL: i32 = 3;

/// An active falling piece
///
/// A piece owns no board cells. Its blocks are computed on demand from the
/// anchor plus the shape offsets of the current rotation. Movement here is
/// unchecked; ask a [`CollisionDetector`](crate::collision::CollisionDetector)
/// first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Anchor position (row, col); row 0 is the top of the board
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Create a new piece at the default spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self::spawn_at(piece_type, DEFAULT_SPAWN_COL)
    }

    /// Create a new piece on row 0 at a given anchor column
    pub fn spawn_at(piece_type: TetrominoType, col: i32) -> Self {
        Self {
            piece_type,
            rotation: Rotation::North,
            row: 0,
            col,
        }
    }

    pub fn color(&self) -> Color {
        self.piece_type.color()
    }

    /// Offsets for the current rotation
    pub fn shape(&self) -> [(i32, i32); 4] {
        self.piece_type.shape(self.rotation)
    }

    /// Get the absolute positions of all 4 blocks
    pub fn block_positions(&self) -> [(i32, i32); 4] {
        self.shape().map(|(dr, dc)| (self.row + dr, self.col + dc))
    }

    pub fn move_left(&mut self) {
        self.col -= 1;
    }

    pub fn move_right(&mut self) {
        self.col += 1;
    }

    pub fn move_down(&mut self) {
        self.row += 1;
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotation = self.rotation.cw();
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotation = self.rotation.ccw();
    }

    pub fn rotate(&mut self, direction: RotationDirection) {
        self.rotation = self.rotation.turned(direction);
    }

    /// Shift the anchor by a (row, col) offset
    pub fn translate(&mut self, (dr, dc): (i32, i32)) {
        self.row += dr;
        self.col += dc;
    }

    /// Put the anchor back at the spawn row and a given column
    pub fn reset_to_spawn(&mut self, col: i32) {
        self.row = 0;
        self.col = col;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position() {
        let piece = Piece::new(TetrominoType::T);
        assert_eq!(piece.row, 0);
        assert_eq!(piece.col, 3);
        assert_eq!(piece.rotation, Rotation::North);
        assert_eq!(piece.color(), Color::Purple);
    }

    #[test]
    fn test_movement() {
        let mut piece = Piece::new(TetrominoType::L);
        piece.move_left();
        assert_eq!(piece.col, 2);
        piece.move_right();
        piece.move_right();
        assert_eq!(piece.col, 4);
        piece.move_down();
        assert_eq!(piece.row, 1);
        piece.translate((-1, -2));
        assert_eq!((piece.row, piece.col), (0, 2));
    }

    #[test]
    fn test_block_positions() {
        let mut piece = Piece::new(TetrominoType::I);
        piece.row = 5;
        piece.col = 2;
        assert_eq!(piece.block_positions(), [(5, 2), (5, 3), (5, 4), (5, 5)]);
    }

    #[test]
    fn test_rotation_tracks_state() {
        let mut piece = Piece::new(TetrominoType::T);
        piece.rotate_clockwise();
        assert_eq!(piece.rotation, Rotation::East);
        assert_eq!(piece.shape(), TetrominoType::T.shape(Rotation::East));
        piece.rotate_counter_clockwise();
        piece.rotate_counter_clockwise();
        assert_eq!(piece.rotation, Rotation::West);
        piece.rotate(RotationDirection::Clockwise);
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        for piece_type in TetrominoType::ALL {
            let mut piece = Piece::new(piece_type);
            let original = piece.block_positions();
            for _ in 0..4 {
                piece.rotate_clockwise();
            }
            assert_eq!(piece.rotation, Rotation::North);
            assert_eq!(piece.block_positions(), original);
        }
    }

    #[test]
    fn test_o_piece_rotation_is_noop() {
        let mut piece = Piece::new(TetrominoType::O);
        let original = piece.block_positions();
        for _ in 0..4 {
            piece.rotate_clockwise();
            assert_eq!(piece.block_positions(), original);
        }
    }

    #[test]
    fn test_reset_to_spawn_keeps_rotation() {
        let mut piece = Piece::spawn_at(TetrominoType::S, 5);
        assert_eq!(piece.col, 5);
        piece.rotate_clockwise();
        piece.row = 12;
        piece.reset_to_spawn(3);
        assert_eq!((piece.row, piece.col), (0, 3));
        assert_eq!(piece.rotation, Rotation::East);
    }
}
