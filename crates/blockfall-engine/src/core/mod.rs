//! Board geometry and piece data.
//!
//! - [`PieceKind`], [`Shape`], [`PieceColor`] - the fixed piece catalog
//! - [`ActivePiece`] - a piece placed on the board at some position
//! - [`Board`] - the 10×20 grid of locked cells

pub use self::{active_piece::*, board::*, piece::*};

pub(crate) mod active_piece;
pub(crate) mod board;
pub(crate) mod piece;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;

/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
