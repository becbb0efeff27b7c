use blockfall_engine::{Cell, PieceColor};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

/// One board cell, drawn two terminal columns wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    pub const fn ghost() -> Self {
        Self::new(style::GHOST, "[]")
    }

    pub const fn filled(color: PieceColor) -> Self {
        Self::new(style::filled(color), "")
    }

    pub const fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty => Self::empty(show_dots),
            Cell::Filled(color) => Self::filled(color),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Use a Paragraph to fill the whole area, not just the cells with the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
