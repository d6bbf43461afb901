//! Collision detection and wall kicks
//!
//! Every legality question (moves, locking, rotation, kicks) reduces to
//! [`Board::is_valid_position`] on the four absolute cells a piece would
//! occupy.

use crate::board::Board;
use crate::piece::Piece;
use crate::tetromino::RotationDirection;

/// Anchor offsets (row, col) tried in order when a rotation is rejected:
/// left 1, right 1, left 2, right 2, up 1
pub const WALL_KICKS: [(i32, i32); 5] = [(0, -1), (0, 1), (0, -2), (0, 2), (-1, 0)];

/// Tests piece placements against a borrowed board
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector<'a> {
    board: &'a Board,
}

impl<'a> CollisionDetector<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Whether the piece's current shape fits with its anchor at (row, col)
    pub fn is_valid_move(&self, piece: &Piece, row: i32, col: i32) -> bool {
        piece
            .shape()
            .iter()
            .all(|&(dr, dc)| self.board.is_valid_position(row + dr, col + dc))
    }

    pub fn can_move_left(&self, piece: &Piece) -> bool {
        self.is_valid_move(piece, piece.row, piece.col - 1)
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        self.is_valid_move(piece, piece.row, piece.col + 1)
    }

    pub fn can_move_down(&self, piece: &Piece) -> bool {
        self.is_valid_move(piece, piece.row + 1, piece.col)
    }

    /// A piece locks as soon as it cannot fall, on the floor or on blocks
    pub fn should_lock(&self, piece: &Piece) -> bool {
        !self.can_move_down(piece)
    }

    /// Plain clockwise rotation check, see [`Self::can_rotate_in`]
    pub fn can_rotate(&self, piece: &Piece) -> bool {
        self.can_rotate_in(piece, RotationDirection::Clockwise)
    }

    /// Whether the piece can rotate in place without a kick
    ///
    /// Rejected when any rotated cell is out of bounds or occupied, and also
    /// when the rotation would newly put the piece flush against a side
    /// wall. Such rotations must go through [`Self::wall_kick_offset_in`].
    pub fn can_rotate_in(&self, piece: &Piece, direction: RotationDirection) -> bool {
        let next = piece.piece_type.shape(piece.rotation.turned(direction));
        let fits = next
            .iter()
            .all(|&(dr, dc)| self.board.is_valid_position(piece.row + dr, piece.col + dc));
        if !fits {
            return false;
        }

        let (min_col, max_col) = column_span(&next, piece.col);
        let (current_min, current_max) = column_span(&piece.shape(), piece.col);
        let right_wall = self.board.width() as i32 - 1;

        let touches_left = min_col == 0 && current_min > 0;
        let touches_right = max_col == right_wall && current_max < right_wall;
        !(touches_left || touches_right)
    }

    /// Clockwise kick search, see [`Self::wall_kick_offset_in`]
    pub fn wall_kick_offset(&self, piece: &Piece) -> Option<(i32, i32)> {
        self.wall_kick_offset_in(piece, RotationDirection::Clockwise)
    }

    /// First offset from [`WALL_KICKS`] under which every rotated cell is valid
    pub fn wall_kick_offset_in(
        &self,
        piece: &Piece,
        direction: RotationDirection,
    ) -> Option<(i32, i32)> {
        let next = piece.piece_type.shape(piece.rotation.turned(direction));
        WALL_KICKS.into_iter().find(|&(kick_row, kick_col)| {
            next.iter().all(|&(dr, dc)| {
                self.board
                    .is_valid_position(piece.row + kick_row + dr, piece.col + kick_col + dc)
            })
        })
    }

    /// Rows the piece can still fall before it has to lock
    pub fn drop_distance(&self, piece: &Piece) -> i32 {
        if !self.is_valid_move(piece, piece.row, piece.col) {
            return 0;
        }
        let mut distance = 0;
        while self.is_valid_move(piece, piece.row + distance + 1, piece.col) {
            distance += 1;
        }
        distance
    }
}

fn column_span(shape: &[(i32, i32); 4], col: i32) -> (i32, i32) {
    shape
        .iter()
        .fold((i32::MAX, i32::MIN), |(min, max), &(_, dc)| {
            (min.min(col + dc), max.max(col + dc))
        })
}
