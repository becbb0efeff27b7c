use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    BOARD_WIDTH,
    board::Board,
    piece::{PIECE_CELLS, PieceKind, Shape},
};

/// The falling piece: its kind, its current (possibly rotated) shape and
/// the board position of the shape's top-left corner.
///
/// Pieces are immutable values. Movement and rotation return new pieces,
/// which the caller checks against the board before committing.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, PieceKind};
///
/// let board = Board::INITIAL;
/// let piece = ActivePiece::spawn(PieceKind::T);
/// assert_eq!((piece.position().x(), piece.position().y()), (4, 0));
///
/// let moved = piece.left();
/// assert!(!board.is_colliding(&moved));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivePiece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl ActivePiece {
    /// Creates an unrotated piece at the spawn position for its shape.
    ///
    /// The spawn column centres the shape: `BOARD_WIDTH / 2 - width / 2`.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = kind.shape();
        Self {
            kind,
            shape,
            position: PiecePosition::spawn(&shape),
        }
    }

    #[must_use]
    pub fn new(kind: PieceKind, shape: Shape, position: PiecePosition) -> Self {
        Self {
            kind,
            shape,
            position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns the absolute board positions of the filled cells.
    ///
    /// Positions may lie outside the board; collision checking decides
    /// whether they are valid.
    #[must_use]
    pub fn occupied_positions(&self) -> ArrayVec<(i32, i32), PIECE_CELLS> {
        self.shape
            .filled_cells()
            .map(|(dx, dy)| self.position.offset(dx, dy))
            .collect()
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    /// Returns the piece rotated 90° clockwise around its top-left origin.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    /// Returns where this piece would come to rest if dropped straight down.
    ///
    /// Assumes the current position does not collide.
    #[must_use]
    pub fn simulate_drop_position(&self, board: &Board) -> Self {
        let mut dropped = *self;
        loop {
            let next = dropped.down();
            if board.is_colliding(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}

/// Position of a piece on the board.
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
///
/// Coordinates are signed: a tentative move may leave the board, and a
/// piece may extend above row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn spawn(shape: &Shape) -> Self {
        let x = (BOARD_WIDTH / 2 - shape.width() / 2) as i32;
        Self::new(x, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn offset(self, dx: usize, dy: usize) -> (i32, i32) {
        (self.x + dx as i32, self.y + dy as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions() {
        let expected = [
            (PieceKind::I, 3),
            (PieceKind::O, 4),
            (PieceKind::T, 4),
            (PieceKind::L, 4),
            (PieceKind::J, 4),
            (PieceKind::S, 4),
            (PieceKind::Z, 4),
        ];
        for (kind, x) in expected {
            let piece = ActivePiece::spawn(kind);
            assert_eq!(piece.position(), PiecePosition::new(x, 0), "{kind:?}");
            assert_eq!(*piece.shape(), kind.shape());
            assert_eq!(piece.kind(), kind);
        }
    }

    #[test]
    fn test_occupied_positions() {
        let piece = ActivePiece::spawn(PieceKind::T);
        let cells = piece.occupied_positions();
        assert_eq!(cells.as_slice(), &[(5, 0), (4, 1), (5, 1), (6, 1)]);

        let piece = piece.shifted(-5, -1);
        let cells = piece.occupied_positions();
        assert_eq!(cells.as_slice(), &[(0, -1), (-1, 0), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_moves_keep_kind_and_shape() {
        let piece = ActivePiece::spawn(PieceKind::L);
        for moved in [piece.left(), piece.right(), piece.down()] {
            assert_eq!(moved.kind(), PieceKind::L);
            assert_eq!(moved.shape(), piece.shape());
        }
        assert_eq!(piece.left().position(), PiecePosition::new(3, 0));
        assert_eq!(piece.right().position(), PiecePosition::new(5, 0));
        assert_eq!(piece.down().position(), PiecePosition::new(4, 1));
    }

    #[test]
    fn test_rotation_keeps_origin() {
        let piece = ActivePiece::spawn(PieceKind::I).rotated_cw();
        assert_eq!(piece.position(), PiecePosition::new(3, 0));
        assert_eq!((piece.shape().width(), piece.shape().height()), (1, 4));
    }

    #[test]
    fn test_simulate_drop_position_on_empty_board() {
        let board = Board::INITIAL;
        let piece = ActivePiece::spawn(PieceKind::O);
        let dropped = piece.simulate_drop_position(&board);
        assert_eq!(dropped.position(), PiecePosition::new(4, 18));

        let piece = ActivePiece::spawn(PieceKind::I).rotated_cw();
        let dropped = piece.simulate_drop_position(&board);
        assert_eq!(dropped.position(), PiecePosition::new(3, 16));
    }

    #[test]
    fn test_simulate_drop_position_on_stack() {
        let board = Board::from_ascii(
            "
            ....#.....
            ....#.....
            ",
        );
        let piece = ActivePiece::spawn(PieceKind::O);
        let dropped = piece.simulate_drop_position(&board);
        assert_eq!(dropped.position(), PiecePosition::new(4, 16));
    }

    #[test]
    fn test_piece_serialization() {
        let piece = ActivePiece::spawn(PieceKind::S).rotated_cw().down();
        let value = serde_json::to_value(piece).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "S",
                "shape": "10/11/01",
                "position": { "x": 4, "y": 1 },
            })
        );
        let deserialized: ActivePiece = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, piece);
    }
}
