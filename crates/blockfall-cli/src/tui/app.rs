use std::time::Duration;

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Trait for TUI applications.
///
/// Applications executed by `Tui::run()` must implement this trait.
pub trait App {
    /// Called once before the event loop starts. Use this to configure the
    /// tick interval and render mode.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, mouse, resize, etc.).
    fn handle_event(&mut self, event: &Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the application by the wall-clock time since the previous
    /// tick.
    fn update(&mut self, elapsed: Duration);
}
