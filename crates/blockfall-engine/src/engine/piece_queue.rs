use std::mem;

use crate::core::piece::PieceKind;

use super::piece_bag::{PieceBag, PieceSeed};

/// One-piece lookahead on top of a [`PieceBag`].
///
/// The queued piece has already been drawn from the bag, so the preview
/// always matches what [`Self::pop_next`] returns.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: PieceBag,
    next: PieceKind,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::from_bag(PieceBag::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_bag(PieceBag::with_seed(seed))
    }

    fn from_bag(mut bag: PieceBag) -> Self {
        let next = bag.pop_next();
        Self { bag, next }
    }

    /// Returns the queued piece and draws a replacement from the bag.
    pub fn pop_next(&mut self) -> PieceKind {
        mem::replace(&mut self.next, self.bag.pop_next())
    }

    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    #[test]
    fn test_peek_matches_pop() {
        let mut queue = PieceQueue::with_seed(SEED);
        for _ in 0..30 {
            let peeked = queue.peek_next();
            assert_eq!(queue.pop_next(), peeked);
        }
    }

    #[test]
    fn test_queue_preserves_bag_order() {
        let expected: Vec<_> = PieceBag::with_seed(SEED).take(21).collect();
        let mut queue = PieceQueue::with_seed(SEED);
        let actual: Vec<_> = (0..21).map(|_| queue.pop_next()).collect();
        assert_eq!(actual, expected);
    }
}
