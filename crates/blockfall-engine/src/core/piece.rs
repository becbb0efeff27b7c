use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest bounding box any piece shape (in any rotation) occupies.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Number of cells a tetromino occupies.
pub const PIECE_CELLS: usize = 4;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// J-piece.
    J = 4,
    /// S-piece.
    S = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the unrotated shape of this piece kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the display color of this piece kind.
    #[must_use]
    pub const fn color(self) -> PieceColor {
        PIECE_COLORS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('L'), Some(PieceKind::L));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Color tag written into board cells when a piece locks.
///
/// Serialized as a CSS-style hex string (`"#a000f0"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColor {
    r: u8,
    g: u8,
    b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        self.b
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid color tag: expected '#rrggbb', got '{input}'")]
pub struct ParsePieceColorError {
    input: String,
}

impl FromStr for PieceColor {
    type Err = ParsePieceColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceColorError {
            input: s.to_owned(),
        };
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for PieceColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A piece shape: a boolean matrix of at most 4×4 cells.
///
/// Rows are ordered top to bottom, columns left to right. Only the
/// `height × width` top-left region is meaningful.
///
/// Serialized as rows of `0`/`1` joined by `/` (e.g. T is `"010/111"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W > 0 && W <= MAX_SHAPE_SIZE);
        assert!(H > 0 && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (width, height) = (W as u8, H as u8);
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Returns whether the cell at `(x, y)` is filled. Cells outside the
    /// shape's bounding box are empty.
    #[must_use]
    pub const fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height() && self.cells[y][x]
    }

    /// Returns an iterator over the rows of the shape.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells[..self.height()]
            .iter()
            .map(|row| &row[..self.width()])
    }

    /// Returns an iterator of `(dx, dy)` offsets of the filled cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(dx, _)| (dx, dy))
        })
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// An `h × w` shape becomes `w × h`, with
    /// `new[row][col] = old[h - 1 - col][row]`.
    #[must_use]
    pub const fn rotated_cw(&self) -> Self {
        let (w, h) = (self.width(), self.height());
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut row = 0;
        while row < w {
            let mut col = 0;
            while col < h {
                cells[row][col] = self.cells[h - 1 - col][row];
                col += 1;
            }
            row += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for &filled in row {
                f.write_str(if filled { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseShapeError {
    #[display("shape must have 1 to {MAX_SHAPE_SIZE} rows, got {_0}")]
    InvalidHeight(#[error(not(source))] usize),
    #[display("shape rows must have 1 to {MAX_SHAPE_SIZE} cells of equal length")]
    InvalidWidth,
    #[display("invalid shape cell: '{_0}'")]
    InvalidCell(#[error(not(source))] char),
    #[display("shape must have exactly {PIECE_CELLS} filled cells, got {_0}")]
    InvalidCellCount(#[error(not(source))] usize),
}

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.is_empty() || rows.len() > MAX_SHAPE_SIZE {
            return Err(ParseShapeError::InvalidHeight(rows.len()));
        }
        let width = rows[0].chars().count();
        if width == 0 || width > MAX_SHAPE_SIZE {
            return Err(ParseShapeError::InvalidWidth);
        }

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(ParseShapeError::InvalidWidth);
            }
            for (x, ch) in row.chars().enumerate() {
                cells[y][x] = match ch {
                    '0' => false,
                    '1' => true,
                    _ => return Err(ParseShapeError::InvalidCell(ch)),
                };
            }
        }

        let filled = cells.iter().flatten().filter(|&&filled| filled).count();
        if filled != PIECE_CELLS {
            return Err(ParseShapeError::InvalidCellCount(filled));
        }

        #[expect(clippy::cast_possible_truncation)]
        let (width, height) = (width as u8, rows.len() as u8);
        Ok(Self {
            width,
            height,
            cells,
        })
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const PIECE_SHAPES: [Shape; PieceKind::LEN] = [
    // I-piece
    Shape::from_rows([[1, 1, 1, 1]]),
    // O-piece
    Shape::from_rows([[1, 1], [1, 1]]),
    // T-piece
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    // L-piece
    Shape::from_rows([[1, 0], [1, 0], [1, 1]]),
    // J-piece
    Shape::from_rows([[0, 1], [0, 1], [1, 1]]),
    // S-piece
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    // Z-piece
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
];

const PIECE_COLORS: [PieceColor; PieceKind::LEN] = [
    PieceColor::rgb(0x00, 0xf0, 0xf0),
    PieceColor::rgb(0xf0, 0xf0, 0x00),
    PieceColor::rgb(0xa0, 0x00, 0xf0),
    PieceColor::rgb(0xf0, 0xa0, 0x00),
    PieceColor::rgb(0x00, 0x00, 0xf0),
    PieceColor::rgb(0x00, 0xf0, 0x00),
    PieceColor::rgb(0xf0, 0x00, 0x00),
];
