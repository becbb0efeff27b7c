use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{active_piece::ActivePiece, board::Board, piece::PieceKind};

use super::game_session::{GameSession, SessionState};

/// Read-only, serializable view of a [`GameSession`].
///
/// Captures everything a front-end displays: board, active piece, ghost,
/// hold and next previews, progression and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSnapshot {
    pub state: SessionState,
    pub board: Board,
    pub active_piece: ActivePiece,
    pub drop_preview: ActivePiece,
    pub held_piece: Option<PieceKind>,
    pub next_piece: PieceKind,
    pub can_hold: bool,
    pub score: usize,
    pub level: usize,
    pub drop_interval_ms: u64,
    pub completed_pieces: usize,
    pub total_cleared_lines: usize,
    pub line_cleared_counter: [usize; 5],
    pub play_time_ms: u64,
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            state: session.session_state(),
            board: session.board().clone(),
            active_piece: *session.active_piece(),
            drop_preview: session.drop_preview(),
            held_piece: session.held_piece(),
            next_piece: session.next_piece(),
            can_hold: session.can_hold(),
            score: stats.score(),
            level: stats.level(),
            drop_interval_ms: as_millis(stats.drop_interval()),
            completed_pieces: stats.completed_pieces(),
            total_cleared_lines: stats.total_cleared_lines(),
            line_cleared_counter: *stats.line_cleared_counter(),
            play_time_ms: as_millis(session.duration()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceSeed;

    const SEED: PieceSeed = PieceSeed::from_bytes([3; 16]);

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = GameSession::with_seed(SEED);
        session.try_hold().unwrap();
        session.tick(Duration::from_millis(250));

        let snapshot = session.snapshot();
        assert!(snapshot.state.is_running());
        assert_eq!(snapshot.active_piece, *session.active_piece());
        assert_eq!(snapshot.drop_preview, session.drop_preview());
        assert_eq!(snapshot.held_piece, session.held_piece());
        assert_eq!(snapshot.next_piece, session.next_piece());
        assert!(!snapshot.can_hold);
        assert_eq!(snapshot.level, 1);
        assert_eq!(snapshot.drop_interval_ms, 1000);
        assert_eq!(snapshot.play_time_ms, 250);
    }

    #[test]
    fn test_snapshot_json() {
        let mut session = GameSession::with_seed(SEED);
        session.toggle_pause();
        let snapshot = session.snapshot();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["state"], "Paused");
        assert_eq!(value["score"], 0);
        assert!(value["held_piece"].is_null());
        assert_eq!(
            value["next_piece"],
            serde_json::to_value(session.next_piece()).unwrap()
        );
        assert_eq!(value["board"]["rows"].as_array().unwrap().len(), 20);

        let deserialized: GameSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, snapshot);
    }
}
