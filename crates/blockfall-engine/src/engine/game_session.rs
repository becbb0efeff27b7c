use std::time::Duration;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use crate::{
    ActionError, HoldError,
    core::{active_piece::ActivePiece, board::Board, piece::PieceKind},
};

use super::{
    game_field::{DropOutcome, GameField, LockOutcome},
    game_stats::GameStats,
    piece_bag::PieceSeed,
    snapshot::GameSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Running,
    Paused,
    GameOver,
}

/// A complete game: field, statistics and the running/paused/game-over
/// state machine.
///
/// Every piece operation is ignored with [`ActionError::NotRunning`]
/// unless the session is running. Game over is a normal state; only
/// [`Self::reset`] leaves it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{GameSession, PieceSeed};
///
/// let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
/// let mut session = GameSession::with_seed(seed);
///
/// _ = session.try_move_left();
/// session.hard_drop().unwrap();
/// session.tick(Duration::from_millis(16));
///
/// assert_eq!(session.stats().completed_pieces(), 1);
/// assert!(session.session_state().is_running());
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    seed: Option<PieceSeed>,
    drop_counter: Duration,
    play_time: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Creates a running session with a randomly seeded bag.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(GameField::new(), None)
    }

    /// Creates a running session whose piece sequence is determined by
    /// `seed`. [`Self::reset`] replays the same sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_parts(GameField::with_seed(seed), Some(seed))
    }

    fn from_parts(field: GameField, seed: Option<PieceSeed>) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Running,
            seed,
            drop_counter: Duration::ZERO,
            play_time: Duration::ZERO,
        }
    }

    /// Starts over with an empty board, a fresh bag and zeroed statistics.
    pub fn reset(&mut self) {
        let field = match self.seed {
            Some(seed) => GameField::with_seed(seed),
            None => GameField::new(),
        };
        *self = Self::from_parts(field, self.seed);
        info!("session reset");
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session_state.is_paused()
    }

    #[must_use]
    pub fn seed(&self) -> Option<PieceSeed> {
        self.seed
    }

    /// Returns the time spent running, excluding pauses.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        self.field.active_piece()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.field.held_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.field.next_piece()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.field.can_hold()
    }

    #[must_use]
    pub fn drop_preview(&self) -> ActivePiece {
        self.field.drop_preview()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.stats.drop_interval()
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Running => SessionState::Paused,
            SessionState::Paused => SessionState::Running,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Advances the gravity timer by `elapsed`.
    ///
    /// Once the accumulated time exceeds the drop interval, the active
    /// piece is soft-dropped and the timer restarts from zero; any
    /// overshoot is discarded. Does nothing unless running.
    pub fn tick(&mut self, elapsed: Duration) {
        if !self.session_state.is_running() {
            return;
        }
        self.play_time += elapsed;
        self.drop_counter += elapsed;
        if self.drop_counter > self.stats.drop_interval() {
            self.drop_counter = Duration::ZERO;
            self.apply_soft_drop();
        }
    }

    fn ensure_running(&self) -> Result<(), ActionError> {
        if self.session_state.is_running() {
            Ok(())
        } else {
            Err(ActionError::NotRunning)
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        self.field.try_move_left()?;
        Ok(())
    }

    pub fn try_move_right(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        self.field.try_move_right()?;
        Ok(())
    }

    pub fn try_rotate_cw(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        self.field.try_rotate_cw()?;
        Ok(())
    }

    /// Moves the active piece down one row, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        self.apply_soft_drop();
        Ok(())
    }

    pub fn hard_drop(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        let outcome = self.field.hard_drop();
        self.complete_piece_drop(outcome);
        Ok(())
    }

    pub fn try_hold(&mut self) -> Result<(), ActionError> {
        self.ensure_running()?;
        match self.field.try_hold() {
            Ok(()) => {
                trace!(
                    "held {:?}, active {:?}",
                    self.field.held_piece(),
                    self.field.active_piece().kind()
                );
            }
            Err(HoldError::HoldAlreadyUsed) => return Err(ActionError::HoldAlreadyUsed),
            Err(HoldError::PieceCollision(_)) => self.game_over(),
        }
        Ok(())
    }

    fn apply_soft_drop(&mut self) {
        if let DropOutcome::Locked(outcome) = self.field.soft_drop() {
            self.complete_piece_drop(outcome);
        }
    }

    fn complete_piece_drop(&mut self, outcome: LockOutcome) {
        debug!(
            "locked {:?} at {:?}, cleared {} lines, next {:?}",
            outcome.locked.kind(),
            outcome.locked.position(),
            outcome.cleared_lines,
            self.field.active_piece().kind(),
        );
        if self.stats.complete_piece_drop(outcome.cleared_lines) {
            info!(
                "level {} reached, drop interval {:?}",
                self.stats.level(),
                self.stats.drop_interval()
            );
        }
        if outcome.topped_out {
            self.game_over();
        }
    }

    fn game_over(&mut self) {
        self.session_state = SessionState::GameOver;
        info!(
            "game over: score {}, {} pieces, {} lines",
            self.stats.score(),
            self.stats.completed_pieces(),
            self.stats.total_cleared_lines()
        );
    }
}
