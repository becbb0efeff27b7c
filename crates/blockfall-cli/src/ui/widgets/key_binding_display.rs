use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys that trigger one action, e.g. `←/→ Move`.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    keys: &'static [&'static str],
    action: &'static str,
}

impl KeyBinding {
    pub const fn new(keys: &'static [&'static str], action: &'static str) -> Self {
        Self { keys, action }
    }
}

/// Single-line help bar listing key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding]) -> Self {
        Self { bindings }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const ACTION_STYLE: Style = Style::new().fg(Color::White);

impl KeyBindingDisplay<'_> {
    fn line(&self) -> Line<'static> {
        let mut spans = vec![];
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, key) in binding.keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(binding.action, ACTION_STYLE));
        }
        Line::from(spans).centered()
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.line().render(area, buf);
    }
}
