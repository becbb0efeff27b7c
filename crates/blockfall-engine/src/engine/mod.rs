//! Game rules and state management on top of [`crate::core`].
//!
//! - [`PieceBag`] / [`PieceSeed`] - 7-bag piece generation
//! - [`PieceQueue`] - one-piece lookahead
//! - [`HoldSlot`] - once-per-piece hold
//! - [`GameField`] - board, active piece, queue and hold of one game
//! - [`GameStats`] - score, level and drop interval progression
//! - [`GameSession`] - state machine (running, paused, game over) and
//!   gravity timer
//! - [`GameSnapshot`] - serializable view of a session
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally from a seed
//! 2. Feed player input (move, rotate, drops, hold) and elapsed time
//!    through [`GameSession::tick`]
//! 3. Each lock merges the piece, clears lines, updates the score and
//!    spawns the next piece
//! 4. A spawn onto occupied cells ends the game; [`GameSession::reset`]
//!    starts over

pub use self::{
    game_field::*, game_session::*, game_stats::*, hold_slot::*, piece_bag::*, piece_queue::*,
    snapshot::*,
};

mod game_field;
mod game_session;
mod game_stats;
mod hold_slot;
mod piece_bag;
mod piece_queue;
mod snapshot;
