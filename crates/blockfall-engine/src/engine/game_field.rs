use crate::{
    HoldError, PieceCollisionError,
    core::{active_piece::ActivePiece, board::Board, piece::PieceKind},
};

use super::{
    hold_slot::HoldSlot,
    piece_bag::PieceSeed,
    piece_queue::PieceQueue,
};

/// Result of locking the active piece into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    /// The piece as it was merged into the board.
    pub locked: ActivePiece,
    pub cleared_lines: usize,
    /// The piece spawned after the lock collided with the stack.
    pub topped_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    Moved,
    Locked(LockOutcome),
}

/// Board, active piece, piece queue and hold slot of a single game.
///
/// `GameField` knows nothing about scoring or time. It reports lock and
/// spawn results so the owner can update statistics and detect game over.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    active_piece: ActivePiece,
    queue: PieceQueue,
    hold_slot: HoldSlot,
}

impl Default for GameField {
    fn default() -> Self {
        Self::new()
    }
}

impl GameField {
    #[must_use]
    pub fn new() -> Self {
        Self::from_queue(PieceQueue::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_queue(PieceQueue::with_seed(seed))
    }

    fn from_queue(mut queue: PieceQueue) -> Self {
        let active_piece = ActivePiece::spawn(queue.pop_next());
        Self {
            board: Board::INITIAL,
            active_piece,
            queue,
            hold_slot: HoldSlot::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active_piece
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.hold_slot.held()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek_next()
    }

    #[must_use]
    pub fn can_hold(&self) -> bool {
        self.hold_slot.can_hold()
    }

    /// Returns where the active piece would land on a hard drop.
    #[must_use]
    pub fn drop_preview(&self) -> ActivePiece {
        self.active_piece.simulate_drop_position(&self.board)
    }

    /// Makes a freshly spawned piece of `kind` the active piece.
    ///
    /// The piece becomes active even when it collides; the error tells the
    /// caller the game is over.
    pub fn spawn(&mut self, kind: PieceKind) -> Result<(), PieceCollisionError> {
        self.active_piece = ActivePiece::spawn(kind);
        if self.board.is_colliding(&self.active_piece) {
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    fn set_active_piece(&mut self, piece: ActivePiece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.active_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.right())
    }

    /// Rotates the active piece clockwise in place. No wall kicks are tried.
    pub fn try_rotate_cw(&mut self) -> Result<(), PieceCollisionError> {
        self.set_active_piece(self.active_piece.rotated_cw())
    }

    /// Moves the active piece down one row, or locks it if it is resting.
    pub fn soft_drop(&mut self) -> DropOutcome {
        match self.set_active_piece(self.active_piece.down()) {
            Ok(()) => DropOutcome::Moved,
            Err(PieceCollisionError) => DropOutcome::Locked(self.lock()),
        }
    }

    /// Drops the active piece to its landing row and locks it.
    pub fn hard_drop(&mut self) -> LockOutcome {
        self.active_piece = self.drop_preview();
        self.lock()
    }

    fn lock(&mut self) -> LockOutcome {
        let locked = self.active_piece;
        self.board.fill_piece(&locked);
        let cleared_lines = self.board.clear_lines();
        let next = self.queue.pop_next();
        let topped_out = self.spawn(next).is_err();
        self.hold_slot.enable();
        LockOutcome {
            locked,
            cleared_lines,
            topped_out,
        }
    }

    /// Sets the active piece aside.
    ///
    /// With an empty slot, the next queued piece is spawned; otherwise the
    /// held kind is swapped back in at its spawn position. Hold stays
    /// disabled until the next lock.
    ///
    /// [`HoldError::PieceCollision`] means the hold happened but the new
    /// active piece collides.
    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        let current = self.active_piece.kind();
        let kind = match self.hold_slot.hold(current)? {
            Some(held) => held,
            None => self.queue.pop_next(),
        };
        self.spawn(kind).map_err(HoldError::PieceCollision)
    }

    #[cfg(test)]
    pub(crate) fn replace_board(&mut self, board: Board) {
        self.board = board;
    }

    #[cfg(test)]
    pub(crate) fn replace_active_piece(&mut self, piece: ActivePiece) {
        self.active_piece = piece;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BOARD_HEIGHT, active_piece::PiecePosition};

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    fn obstructed_board() -> Board {
        Board::from_ascii(&"#########.\n".repeat(BOARD_HEIGHT))
    }

    #[test]
    fn test_new_field_spawns_from_queue() {
        let mut bag = crate::PieceBag::with_seed(SEED);
        let field = GameField::with_seed(SEED);
        assert_eq!(field.active_piece().kind(), bag.pop_next());
        assert_eq!(field.next_piece(), bag.pop_next());
        assert_eq!(*field.active_piece(), ActivePiece::spawn(field.active_piece().kind()));
        assert_eq!(field.held_piece(), None);
        assert!(field.can_hold());
    }

    #[test]
    fn test_move_against_wall_is_rejected() {
        let mut field = GameField::with_seed(SEED);
        while field.try_move_left().is_ok() {}
        let piece = *field.active_piece();
        assert_eq!(piece.position().x(), 0);
        assert_eq!(field.try_move_left(), Err(PieceCollisionError));
        assert_eq!(*field.active_piece(), piece);
    }

    #[test]
    fn test_rotation_out_of_bounds_is_rejected() {
        let mut field = GameField::with_seed(SEED);
        let vertical = ActivePiece::spawn(PieceKind::I).rotated_cw().shifted(6, 5);
        assert_eq!(vertical.position(), PiecePosition::new(9, 5));
        field.replace_active_piece(vertical);

        assert_eq!(field.try_rotate_cw(), Err(PieceCollisionError));
        assert_eq!(*field.active_piece(), vertical);
    }

    #[test]
    fn test_rotation_in_open_space() {
        let mut field = GameField::with_seed(SEED);
        field.replace_active_piece(ActivePiece::spawn(PieceKind::T).down());
        field.try_rotate_cw().unwrap();
        assert_eq!(field.active_piece().shape().to_string(), "10/11/10");
        assert_eq!(field.active_piece().position(), PiecePosition::new(4, 1));
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut field = GameField::with_seed(SEED);
        field.replace_active_piece(ActivePiece::spawn(PieceKind::O).shifted(0, 17));

        assert!(field.soft_drop().is_moved());
        assert_eq!(field.active_piece().position(), PiecePosition::new(4, 18));

        let next = field.next_piece();
        let DropOutcome::Locked(outcome) = field.soft_drop() else {
            panic!("resting piece should lock");
        };
        assert_eq!(outcome.cleared_lines, 0);
        assert!(!outcome.topped_out);
        assert_eq!(outcome.locked.position(), PiecePosition::new(4, 18));
        assert!(!field.board().is_empty_at(4, 19));
        assert_eq!(*field.active_piece(), ActivePiece::spawn(next));
    }

    #[test]
    fn test_hard_drop_clears_lines() {
        let mut field = GameField::with_seed(SEED);
        field.replace_board(Board::from_ascii(
            "
            .......#..
            ####..####
            ####..####
            ",
        ));
        field.replace_active_piece(ActivePiece::spawn(PieceKind::O));

        let outcome = field.hard_drop();
        assert_eq!(outcome.cleared_lines, 2);
        assert!(!outcome.topped_out);
        assert_eq!(
            *field.board(),
            Board::from_ascii(
                "
                .......#..
                "
            )
        );
    }

    #[test]
    fn test_drop_preview_does_not_mutate() {
        let field = GameField::with_seed(SEED);
        let before = *field.active_piece();
        let preview = field.drop_preview();
        assert_eq!(*field.active_piece(), before);
        assert_eq!(preview.kind(), before.kind());
        assert_eq!(preview.position().x(), before.position().x());
        assert!(field.board().is_colliding(&preview.down()));
    }

    #[test]
    fn test_first_hold_takes_from_queue() {
        let mut field = GameField::with_seed(SEED);
        let first = field.active_piece().kind();
        let next = field.next_piece();

        field.try_hold().unwrap();
        assert_eq!(field.held_piece(), Some(first));
        assert_eq!(*field.active_piece(), ActivePiece::spawn(next));
        assert!(!field.can_hold());

        // a second hold before locking is ignored
        let active = *field.active_piece();
        assert_eq!(field.try_hold(), Err(HoldError::HoldAlreadyUsed));
        assert_eq!(field.held_piece(), Some(first));
        assert_eq!(*field.active_piece(), active);
    }

    #[test]
    fn test_hold_swaps_after_lock() {
        let mut field = GameField::with_seed(SEED);
        let first = field.active_piece().kind();
        field.try_hold().unwrap();
        field.hard_drop();
        assert!(field.can_hold());

        let current = field.active_piece().kind();
        let next = field.next_piece();
        field.try_hold().unwrap();
        assert_eq!(field.held_piece(), Some(current));
        assert_eq!(*field.active_piece(), ActivePiece::spawn(first));
        assert_eq!(field.next_piece(), next);
        assert!(!field.can_hold());
    }

    #[test]
    fn test_hold_swap_onto_stack_collides() {
        let mut field = GameField::with_seed(SEED);
        let first = field.active_piece().kind();
        field.try_hold().unwrap();
        field.hard_drop();

        field.replace_board(obstructed_board());
        assert_eq!(
            field.try_hold(),
            Err(HoldError::PieceCollision(PieceCollisionError))
        );
        assert_eq!(field.active_piece().kind(), first);
    }

    #[test]
    fn test_lock_reports_top_out() {
        let mut field = GameField::with_seed(SEED);
        field.replace_board(obstructed_board());
        let outcome = field.hard_drop();
        assert!(outcome.topped_out);
        assert_eq!(outcome.cleared_lines, 0);
    }
}
