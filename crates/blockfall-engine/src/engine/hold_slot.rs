use crate::{HoldError, core::piece::PieceKind};

/// Storage for a single set-aside piece kind.
///
/// Holding is allowed once per piece: after a hold, the slot stays locked
/// until [`Self::enable`] is called when the next piece locks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    can_hold: bool,
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldSlot {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            held: None,
            can_hold: true,
        }
    }

    #[must_use]
    pub const fn held(&self) -> Option<PieceKind> {
        self.held
    }

    #[must_use]
    pub const fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Stores `current` and returns the previously held kind, if any.
    ///
    /// Fails without changing anything if hold was already used for the
    /// current piece.
    pub fn hold(&mut self, current: PieceKind) -> Result<Option<PieceKind>, HoldError> {
        if !self.can_hold {
            return Err(HoldError::HoldAlreadyUsed);
        }
        self.can_hold = false;
        Ok(self.held.replace(current))
    }

    pub fn enable(&mut self) {
        self.can_hold = true;
    }
}
