use blockfall_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Full game view: hold and stats on the left, the board in the middle and
/// the next piece on the right.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> Color {
        match self.session.session_state() {
            SessionState::Running => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        }
    }

    fn panel(&self, title: &'static str) -> Block<'static> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::symmetric(
                self.horizontal_padding,
                self.vertical_padding,
            ))
            .border_style(self.border_color())
            .style(style::DEFAULT)
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let session = self.session;

        let game_board = {
            let widget = BoardDisplay::new(session.board())
                .active_piece(*session.active_piece())
                .block(
                    Block::bordered()
                        .border_style(self.border_color())
                        .style(style::DEFAULT),
                );
            if self.show_ghost && session.session_state().is_running() {
                widget.ghost(session.drop_preview())
            } else {
                widget
            }
        };
        let hold_title = if session.can_hold() { "HOLD" } else { "HOLD (used)" };
        let hold_panel = PieceDisplay::new()
            .piece(session.held_piece())
            .block(self.panel(hold_title));
        let next_panel = PieceDisplay::new()
            .piece(Some(session.next_piece()))
            .block(self.panel("NEXT"));
        let stats = StatsDisplay::new(session).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(stats.width())]).flex(Flex::End),
        )[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        hold_panel.render(hold_area, buf);
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        let popup = match session.session_state() {
            SessionState::Running => None,
            SessionState::Paused => {
                Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
            }
            SessionState::GameOver => {
                Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    fn render(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session, true).render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_panels_are_drawn() {
        let session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        let screen = render(&session);
        assert!(screen.contains("HOLD"));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("SCORE"));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_pause_popup() {
        let mut session = GameSession::with_seed(PieceSeed::from_bytes([1; 16]));
        session.toggle_pause();
        assert!(render(&session).contains("PAUSED"));
    }
}
