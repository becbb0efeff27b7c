use std::time::Duration;

use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::PlayScreen,
    tui::{App, RenderMode, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: PlayScreen,
    fps: f64,
}

impl PlayApp {
    pub fn new(session: GameSession, fps: f64, show_ghost: bool) -> Self {
        Self {
            screen: PlayScreen::new(session, show_ghost),
            fps,
        }
    }

    pub fn session(&self) -> &GameSession {
        self.screen.session()
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.fps);
        tui.set_render_mode(RenderMode::throttled_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, elapsed: Duration) {
        self.screen.update(elapsed);
    }
}
