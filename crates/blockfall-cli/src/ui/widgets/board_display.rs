use std::iter;

use blockfall_engine::{ActivePiece, Board};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::ui::widgets::BlockDisplay;

type Grid = Vec<[BlockDisplay; Board::WIDTH]>;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<ActivePiece>,
    active_piece: Option<ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            active_piece: None,
            block: None,
        }
    }

    pub fn ghost(self, piece: ActivePiece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub fn active_piece(self, piece: ActivePiece) -> Self {
        Self {
            active_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Board::WIDTH as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Board::HEIGHT as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn grid(&self) -> Grid {
        let mut grid: Grid = self
            .board
            .rows()
            .map(|row| row.map(|cell| BlockDisplay::from_cell(cell, true)))
            .collect();
        if let Some(ghost) = &self.ghost {
            overlay(&mut grid, ghost, BlockDisplay::ghost());
        }
        if let Some(piece) = &self.active_piece {
            overlay(&mut grid, piece, BlockDisplay::filled(piece.kind().color()));
        }
        grid
    }
}

/// Paints the piece's cells that lie on the board; cells above row 0 are
/// not shown.
fn overlay(grid: &mut Grid, piece: &ActivePiece, display: BlockDisplay) {
    for (x, y) in piece.occupied_positions() {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
            && let Some(slot) = grid.get_mut(y).and_then(|row| row.get_mut(x))
        {
            *slot = display;
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Board::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Board::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Board::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Board::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                block.render(grid_cell, buf);
            }
        }
    }
}
