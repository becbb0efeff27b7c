//! Falling-block puzzle engine on a fixed 10×20 board.
//!
//! The crate is split into [`core`] (piece catalog, active piece, board)
//! and [`engine`] (bag randomizer, hold slot, scoring and the session
//! state machine). It has no clock or I/O of its own: time enters only
//! through [`GameSession::tick`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HoldError {
    #[display("piece colliding when holding piece")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used in this turn")]
    HoldAlreadyUsed,
}

/// Reason a session operation was ignored.
///
/// An ignored operation never changes the session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum ActionError {
    #[display("session is not running")]
    NotRunning,
    #[display("operation rejected by collision")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used in this turn")]
    HoldAlreadyUsed,
}

impl From<PieceCollisionError> for ActionError {
    fn from(err: PieceCollisionError) -> Self {
        Self::PieceCollision(err)
    }
}
