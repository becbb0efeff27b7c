use std::{fmt::Display, time::Duration};

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use crate::ui::widgets::style;

const INNER_WIDTH: u16 = 18;

/// Score, progression and line-clear counts of a session, one stat per line.
pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        INNER_WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let lines = u16::try_from(stat_lines(self.session, 0).len()).unwrap_or(u16::MAX);
        lines + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Lays out `label` and `value` at opposite ends of a `width`-column line.
fn spread(label: &str, value: impl Display, width: usize) -> String {
    let value = value.to_string();
    let gap = width.saturating_sub(label.len() + value.len()).max(1);
    format!("{label}{:gap$}{value}", "")
}

fn play_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}:{:02}.{:02}",
        secs / 60,
        secs % 60,
        duration.subsec_millis() / 10
    )
}

fn stat_lines(session: &GameSession, width: usize) -> Vec<String> {
    let stats = session.stats();
    let mut lines = vec![
        spread("SCORE", session.score(), width),
        spread("LEVEL", session.level(), width),
        spread(
            "SPEED",
            format!("{}ms", session.drop_interval().as_millis()),
            width,
        ),
        spread("TIME", play_time(session.duration()), width),
        String::new(),
        spread("LINES", stats.total_cleared_lines(), width),
        spread("PIECES", stats.completed_pieces(), width),
        String::new(),
        "CLEARS".to_owned(),
    ];
    lines.extend(
        stats.line_cleared_counter()[1..]
            .iter()
            .zip(1..)
            .map(|(count, n)| spread(&format!(" x{n}"), count, width)),
    );
    lines
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.block.as_ref().map_or(area, |block| block.inner(area));
        let lines = stat_lines(self.session, usize::from(inner.width))
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>();

        let mut paragraph = Paragraph::new(lines).style(style::DEFAULT);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    #[test]
    fn test_spread_fills_width() {
        assert_eq!(spread("LEVEL", 2, 12), "LEVEL      2");
        assert_eq!(spread("SCORE", 123_456, 8), "SCORE 123456");
    }

    #[test]
    fn test_play_time_format() {
        assert_eq!(play_time(Duration::ZERO), "0:00.00");
        assert_eq!(play_time(Duration::from_millis(754_321)), "12:34.32");
    }

    #[test]
    fn test_new_session_lines() {
        let session = GameSession::with_seed(PieceSeed::from_bytes([5; 16]));
        let lines = stat_lines(&session, 18);
        assert_eq!(lines[0], "SCORE            0");
        assert_eq!(lines[1], "LEVEL            1");
        assert_eq!(lines[2], "SPEED       1000ms");
        assert_eq!(lines[8], "CLEARS");
        assert_eq!(lines[12], " x4              0");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn test_render_inside_block() {
        let session = GameSession::with_seed(PieceSeed::from_bytes([5; 16]));
        let display = StatsDisplay::new(&session).block(BlockWidget::bordered());
        assert_eq!((display.width(), display.height()), (20, 15));

        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        let row: String = (0..area.width)
            .map(|x| buf[(x, 1)].symbol().to_owned())
            .collect();
        assert_eq!(row, "│SCORE            0│");
    }
}
