use std::time::Duration;

use blockfall_engine::{GameSession, SessionState};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

const RUNNING_KEYS: &[KeyBinding] = &[
    KeyBinding::new(&["←", "→"], "Move"),
    KeyBinding::new(&["↓"], "Soft Drop"),
    KeyBinding::new(&["↑"], "Rotate"),
    KeyBinding::new(&["Space"], "Hard Drop"),
    KeyBinding::new(&["C"], "Hold"),
    KeyBinding::new(&["P"], "Pause"),
    KeyBinding::new(&["R"], "Reset"),
    KeyBinding::new(&["Q"], "Quit"),
];

const PAUSED_KEYS: &[KeyBinding] = &[
    KeyBinding::new(&["P"], "Resume"),
    KeyBinding::new(&["R"], "Reset"),
    KeyBinding::new(&["Q"], "Quit"),
];

const GAME_OVER_KEYS: &[KeyBinding] = &[
    KeyBinding::new(&["R"], "Play Again"),
    KeyBinding::new(&["Q"], "Quit"),
];

#[derive(Debug)]
pub struct PlayScreen {
    session: GameSession,
    show_ghost: bool,
    is_exiting: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession, show_ghost: bool) -> Self {
        Self {
            session,
            show_ghost,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let session_display = SessionDisplay::new(&self.session, self.show_ghost);
        let bindings = match self.session.session_state() {
            SessionState::Running => RUNNING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    /// Applies one key press. Inputs the session ignores (blocked moves,
    /// a second hold, input while paused) are dropped silently.
    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_press_event() else {
            return;
        };
        let session = &mut self.session;
        let result = match event.code {
            KeyCode::Left => session.try_move_left(),
            KeyCode::Right => session.try_move_right(),
            KeyCode::Down => session.soft_drop(),
            KeyCode::Up => session.try_rotate_cw(),
            KeyCode::Char(' ') => session.hard_drop(),
            KeyCode::Char('c' | 'C') => session.try_hold(),
            KeyCode::Char('p' | 'P') => {
                session.toggle_pause();
                Ok(())
            }
            KeyCode::Char('r' | 'R') => {
                session.reset();
                Ok(())
            }
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => {
                self.is_exiting = true;
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            log::trace!("{:?} ignored: {err}", event.code);
        }
    }

    pub fn update(&mut self, elapsed: Duration) {
        self.session.tick(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn screen() -> PlayScreen {
        PlayScreen::new(GameSession::with_seed(PieceSeed::from_bytes([9; 16])), true)
    }

    fn press(screen: &mut PlayScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_keys_drive_session() {
        let mut screen = screen();
        let start = screen.session().active_piece().position();

        press(&mut screen, KeyCode::Left);
        assert_eq!(screen.session().active_piece().position().x(), start.x() - 1);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.session().active_piece().position().y(), start.y() + 1);

        let active = screen.session().active_piece().kind();
        press(&mut screen, KeyCode::Char('c'));
        assert_eq!(screen.session().held_piece(), Some(active));

        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.session().stats().completed_pieces(), 1);
    }

    #[test]
    fn test_pause_reset_and_quit() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('p'));
        assert_eq!(screen.session().session_state(), SessionState::Paused);

        let piece = *screen.session().active_piece();
        press(&mut screen, KeyCode::Left);
        screen.update(Duration::from_secs(3));
        assert_eq!(*screen.session().active_piece(), piece);

        press(&mut screen, KeyCode::Char('r'));
        assert_eq!(screen.session().session_state(), SessionState::Running);

        assert!(!screen.is_exiting());
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.is_exiting());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut screen = screen();
        let mut event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        screen.handle_event(&Event::Key(event));
        assert!(!screen.is_exiting());
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut screen = screen();
        let start = screen.session().active_piece().position();
        screen.update(Duration::from_millis(1001));
        assert_eq!(screen.session().active_piece().position().y(), start.y() + 1);
    }
}
