use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Points per cleared line, multiplied by the level at the time of the clear.
pub const LINE_SCORE: usize = 100;

/// Score needed to advance one level.
pub const SCORE_PER_LEVEL: usize = 1000;

/// Drop interval at level 1.
pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);

/// Amount the drop interval shrinks per level.
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(100);

/// Lower bound for the drop interval.
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: `cleared_lines * LINE_SCORE * level` per lock
/// - **Level**: `score / SCORE_PER_LEVEL + 1`, starting at 1
/// - **Drop interval**: 1000 ms at level 1, 100 ms faster per level, never
///   below 100 ms
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: Count of 0, 1, 2, 3 and 4 line locks
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.drop_interval(), Duration::from_millis(1000));
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.score / SCORE_PER_LEVEL + 1
    }

    /// Returns how long the active piece waits between automatic drops.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        let steps = u32::try_from(self.level() - 1).unwrap_or(u32::MAX);
        BASE_DROP_INTERVAL
            .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(steps))
            .max(MIN_DROP_INTERVAL)
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of cleared lines.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece locks.
    ///
    /// Returns `true` if the level changed.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> bool {
        let level = self.level();
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += cleared_lines * LINE_SCORE * level;
        self.level() != level
    }
}
