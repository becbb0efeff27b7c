use serde::{Deserialize, Serialize};

use super::{
    BOARD_HEIGHT, BOARD_WIDTH,
    active_piece::ActivePiece,
    piece::{PieceColor, PieceKind},
};

/// A single board cell: empty, or filled with the color tag of the piece
/// that locked there.
///
/// Serialized as `null` or the color's hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(from = "Option<PieceColor>", into = "Option<PieceColor>")]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<PieceColor> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

impl From<Option<PieceColor>> for Cell {
    fn from(color: Option<PieceColor>) -> Self {
        color.map_or(Cell::Empty, Cell::Filled)
    }
}

impl From<Cell> for Option<PieceColor> {
    fn from(cell: Cell) -> Self {
        cell.color()
    }
}

/// One row of the board, leftmost column first.
pub type BoardRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Cell::Empty; BOARD_WIDTH];

/// The fixed 10×20 playfield.
///
/// Row 0 is the top of the board. The dimensions never change; only cell
/// contents do. Space above row 0 is open: pieces may extend into it
/// without colliding, as long as they stay within the side walls.
///
/// # Example
///
/// ```
/// use blockfall_engine::{ActivePiece, Board, PieceKind};
///
/// let mut board = Board::INITIAL;
/// let piece = ActivePiece::spawn(PieceKind::I);
/// let landed = piece.simulate_drop_position(&board);
/// board.fill_piece(&landed);
/// assert!(!board.is_empty_at(3, 19));
/// assert_eq!(board.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const INITIAL: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= BOARD_WIDTH` or `y >= BOARD_HEIGHT`.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the board, like [`Self::cell`].
    #[must_use]
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_empty()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> + '_ {
        self.rows.iter()
    }

    /// Checks whether the piece overlaps a wall, the floor, or a filled cell.
    ///
    /// Cells above row 0 only check the side walls.
    #[must_use]
    pub fn is_colliding(&self, piece: &ActivePiece) -> bool {
        piece.occupied_positions().into_iter().any(|(x, y)| {
            let Ok(x) = usize::try_from(x) else {
                return true;
            };
            if x >= BOARD_WIDTH {
                return true;
            }
            match usize::try_from(y) {
                Ok(y) => y >= BOARD_HEIGHT || !self.rows[y][x].is_empty(),
                Err(_) => false,
            }
        })
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// No collision check is performed; the caller must have confirmed a
    /// valid resting position. Cells outside the board are skipped.
    pub fn fill_piece(&mut self, piece: &ActivePiece) {
        let cell = Cell::Filled(piece.kind().color());
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < BOARD_WIDTH && y < BOARD_HEIGHT {
                self.rows[y][x] = cell;
            }
        }
    }

    /// Clears full rows and returns how many were cleared.
    ///
    /// Each full row is removed and an empty row is inserted at the top;
    /// the remaining rows keep their relative order.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].iter().all(|cell| !cell.is_empty()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Creates a `Board` from an ASCII art representation, for tests and
    /// fixtures.
    ///
    /// `.` is an empty cell, `#` a filled gray cell, and a piece letter
    /// (`I`, `O`, `T`, `L`, `J`, `S`, `Z`) a cell filled with that piece's
    /// color. Rows are given top to bottom and are aligned to the bottom of
    /// the board, so only the non-empty lower part needs to be written.
    /// Whitespace is ignored.
    ///
    /// # Panics
    ///
    /// Panics if a row does not have exactly 10 cells, if there are more
    /// than 20 rows, or on an unknown character.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        const GRAY: PieceColor = PieceColor::rgb(0x80, 0x80, 0x80);

        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "At most {BOARD_HEIGHT} rows allowed, got {}",
            lines.len()
        );

        let mut board = Self::INITIAL;
        let top = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Cell> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => Cell::Empty,
                    '#' => Cell::Filled(GRAY),
                    _ => {
                        let kind = PieceKind::from_char(c)
                            .unwrap_or_else(|| panic!("Unknown cell character '{c}'"));
                        Cell::Filled(kind.color())
                    }
                })
                .collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                cells.len(),
            );
            board.rows[top + i].copy_from_slice(&cells);
        }
        board
    }
}
